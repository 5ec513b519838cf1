use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
mod auth;
use std::path::PathBuf;
use unixcrypt::{Crypt, Crypter, Registry, Settings};

#[derive(Debug, clap::Args)]
struct HashArgs {
    /// Crypt function: apr1, md5, sha256 or sha512 (default: sha512)
    #[arg(short, long)]
    algorithm: Option<Crypt>,

    /// Salt characters, or a complete `$id$[rounds=N$]salt` configuration
    #[arg(long)]
    salt: Option<String>,

    /// Number of rounds, SHA-crypt only (default: 5000)
    #[arg(long)]
    rounds: Option<u32>,

    /// Length of a generated salt (default: the algorithm's maximum)
    #[arg(long = "salt-len")]
    salt_len: Option<usize>,
}

impl HashArgs {
    /// Builds the configuration string handed to `Crypter::generate`.
    fn to_config(&self, crypter: &dyn Crypter, settings: &Settings) -> Result<String> {
        let salt = crypter.salt();

        if self.rounds.is_some() && !salt.has_rounds_field() {
            bail!("{} has a fixed cost; --rounds is not supported", salt.magic());
        }
        let rounds = self
            .rounds
            .or(settings.rounds())
            .filter(|_| salt.has_rounds_field());

        let config = match &self.salt {
            Some(full) if full.starts_with('$') => {
                if self.rounds.is_some() {
                    bail!("--rounds cannot be combined with a full configuration string");
                }
                full.clone()
            }
            Some(bare) => salt.compose(bare, rounds),
            None => {
                let len = self
                    .salt_len
                    .or(settings.salt_len())
                    .unwrap_or(salt.salt_len_max());
                salt.generate_with_rounds(len, rounds.unwrap_or(salt.rounds_default()))?
            }
        };
        Ok(config)
    }
}

#[derive(Debug, Parser)]
#[command(name = "unixcrypt")]
#[command(
    version,
    about = "Unix crypt(3)-style password hashing: SHA-crypt, MD5-crypt and APR1."
)]
struct Cli {
    /// Path to a JSON settings file
    #[arg(long, global = true, value_name = "PATH", env = "UNIXCRYPT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Hashes a password
    Hash {
        #[command(flatten)]
        args: HashArgs,
    },

    /// Checks a password against a stored hash
    #[command(arg_required_else_help = true)]
    Verify { hash: String },

    /// Prints the rounds used by a stored hash
    #[command(arg_required_else_help = true)]
    Cost { hash: String },

    /// Prints the crypt function that produced a hash
    #[command(arg_required_else_help = true)]
    Identify { hash: String },

    /// Lists the supported crypt functions
    List,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let args = Cli::parse();
    let registry = Registry::with_defaults();
    let settings = Settings::resolve(args.config.as_deref()).context("failed to load settings")?;

    match args.command {
        Commands::Hash { args } => {
            let tag = args.algorithm.unwrap_or(settings.algorithm());
            let crypter = registry.new_by_tag(tag)?;
            let config = args.to_config(&*crypter, &settings)?;

            let password = auth::read_password()?;
            let hash = crypter.generate(password.as_bytes(), config.as_bytes())?;
            drop(password);
            println!("{hash}");
        }
        Commands::Verify { hash } => {
            let password = auth::read_password()?;
            unixcrypt::verify(&registry, &hash, password.as_bytes())?;
            drop(password);
            println!("password matches");
        }
        Commands::Cost { hash } => {
            let crypter = registry.new_from_hash(&hash)?;
            println!("{}", crypter.cost(&hash)?);
        }
        Commands::Identify { hash } => {
            println!("{}", registry.identify(&hash)?);
        }
        Commands::List => {
            let width = Crypt::ALL
                .iter()
                .map(|c| c.name().len())
                .chain(std::iter::once("Name".len()))
                .max()
                .unwrap_or(0);

            println!("{:<width$}  Prefix", "Name");
            for (tag, prefix) in registry.algorithms() {
                println!("{:<width$}  {prefix}", tag.name());
            }
        }
    }

    Ok(())
}
