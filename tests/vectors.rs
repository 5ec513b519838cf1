use unixcrypt::algorithms::{apr1, md5, sha256, sha512};
use unixcrypt::{Crypt, CryptError, Crypter, Registry};

struct Vector {
    salt: &'static str,
    key: &'static str,
    hash: &'static str,
}

const SHA256_VECTORS: &[Vector] = &[
    Vector {
        salt: "$5$salt",
        key: "secret",
        hash: "$5$salt$kpa26zwgX83BPSR8d7w93OIXbFt/d3UOTZaAu5vsTM6",
    },
    Vector {
        salt: "$5$saltstring",
        key: "Hello world!",
        hash: "$5$saltstring$5B8vYYiY.CVt1RlTTf8KbXBH3hsxY/GNooZaBBGWEc5",
    },
    Vector {
        salt: "$5$rounds=10000$saltstringsaltstring",
        key: "Hello world!",
        hash: "$5$rounds=10000$saltstringsaltst$3xv.VbSHBb41AL9AvLeujZkZRBAwqFMz2.opqey6IcA",
    },
    Vector {
        salt: "$5$rounds=5000$toolongsaltstring",
        key: "This is just a test",
        hash: "$5$rounds=5000$toolongsaltstrin$Un/5jzAHMgOGZ5.mWJpuVolil07guHPvOW8mGRcvxa5",
    },
    Vector {
        salt: "$5$rounds=10$roundstoolow",
        key: "the minimum number is still observed",
        hash: "$5$rounds=1000$roundstoolow$yfvwcWrQ8l/K0DAWyuPMDNHpIVlTQebY9l/gL972bIC",
    },
    Vector {
        salt: "$5$rounds=11858$WH1ABM5sKhxbkgCK",
        key: "test",
        hash: "$5$rounds=11858$WH1ABM5sKhxbkgCK$aTQsjPkz0rBsH3lQlJxw9HDTDXPKBxC0LlVeV69P.t1",
    },
    Vector {
        salt: "$5$sa_lt",
        key: "secret",
        hash: "$5$sa_lt$1EmsWtb9zKEoR3lx3Drz72icQVbI4NjKq1/Vx63aj26",
    },
    Vector {
        salt: "$5$WH1ABM5sKhxbkgCK",
        key: "test",
        hash: "$5$WH1ABM5sKhxbkgCK$sOnTVjQn1Y3EWibd8gWqqJqjH.KaFrxJE5rijqxcPp7",
    },
];

const SHA512_VECTORS: &[Vector] = &[
    Vector {
        salt: "$6$saltstring",
        key: "Hello world!",
        hash: "$6$saltstring$svn8UoSVapNtMuq1ukKS4tPQd8iKwSMHWjl/O817G3uBnIFNjnQJuesI68u4OTLiBFdcbYEdFCoEOfaS35inz1",
    },
    Vector {
        salt: "$6$rounds=10000$saltstringsaltstring",
        key: "Hello world!",
        hash: "$6$rounds=10000$saltstringsaltst$OW1/O6BYHV6BcXZu8QVeXbDWra3Oeqh0sbHbbMCVNSnCM/UrjmM0Dp8vOuZeHBy/YTBmSK6H9qs/y3RnOaw5v.",
    },
    Vector {
        salt: "$6$rounds=11531$G/gkPn17kHYo0gTF",
        key: "test",
        hash: "$6$rounds=11531$G/gkPn17kHYo0gTF$Kq.uZBHlSBXyzsOJXtxJruOOH4yc0Is13uY7yK0PvAvXxbvc1w8DO1RzREMhKsc82K/Jh8OquV8FZUlreYPJk1",
    },
    Vector {
        salt: "$6$G/gkPn17kHYo0gTF",
        key: "test",
        hash: "$6$G/gkPn17kHYo0gTF$xhDFU0QYExdMH2ghOWKrrVtu1BuTpNMSJURCXk43.EYekmK8iwV6RNqftUUC8mqDel1J7m3JEbUkbu4YyqSyv/",
    },
];

const APR1_VECTORS: &[Vector] = &[Vector {
    salt: "$apr1$saltsalt",
    key: "password",
    hash: "$apr1$saltsalt$yAAkm4libquA.ZWLHbSBq/",
}];

const MD5_VECTORS: &[Vector] = &[Vector {
    salt: "$1$5pZSV9va",
    key: "password",
    hash: "$1$5pZSV9va$azfrPr6af3Fc7dLblQXVa0",
}];

fn check(crypter: &dyn Crypter, vectors: &[Vector]) {
    for v in vectors {
        let generated = crypter.generate(v.key.as_bytes(), v.salt.as_bytes()).unwrap();
        assert_eq!(generated, v.hash, "salt {}", v.salt);

        crypter.verify(v.hash, v.key.as_bytes()).unwrap();
        assert_eq!(
            crypter.verify(v.hash, b"not the key"),
            Err(CryptError::KeyMismatch)
        );

        // the stored hash is itself a valid salt argument
        let again = crypter.generate(v.key.as_bytes(), v.hash.as_bytes()).unwrap();
        assert_eq!(again, v.hash);
    }
}

#[test]
fn sha256_vectors() {
    check(&*sha256::new(), SHA256_VECTORS);
}

#[test]
fn sha512_vectors() {
    check(&*sha512::new(), SHA512_VECTORS);
}

#[test]
fn md5_vectors() {
    check(&*md5::new(), MD5_VECTORS);
}

#[test]
fn apr1_vectors() {
    check(&*apr1::new(), APR1_VECTORS);
}

#[test]
fn registry_detects_every_vector() {
    let registry = Registry::with_defaults();
    let all = SHA256_VECTORS
        .iter()
        .map(|v| (v, Crypt::Sha256))
        .chain(SHA512_VECTORS.iter().map(|v| (v, Crypt::Sha512)))
        .chain(MD5_VECTORS.iter().map(|v| (v, Crypt::Md5)))
        .chain(APR1_VECTORS.iter().map(|v| (v, Crypt::Apr1)));

    for (v, tag) in all {
        assert_eq!(registry.identify(v.hash).unwrap(), tag);
        unixcrypt::verify(&registry, v.hash, v.key.as_bytes()).unwrap();
    }
}

#[test]
fn cost_of_vectors() {
    let crypter = sha256::new();
    assert_eq!(crypter.cost(SHA256_VECTORS[2].hash).unwrap(), 10000);
    assert_eq!(crypter.cost(SHA256_VECTORS[4].hash).unwrap(), 1000);
    assert_eq!(crypter.cost(SHA256_VECTORS[1].hash).unwrap(), 5000);
}
