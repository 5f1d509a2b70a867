#![no_main]

use libfuzzer_sys::fuzz_target;
use num_bigint::BigInt;

use tessera_numeric::{BigInteger, Rational};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // Anything accepted must agree with num-bigint and print canonically
    if let Ok(n) = text.parse::<BigInteger>() {
        let reference: BigInt = text.parse().expect("num-bigint rejected a valid integer");
        let printed = n.to_string();
        assert_eq!(printed, reference.to_string());
        assert_eq!(printed.parse::<BigInteger>().unwrap(), n);
    }

    if let Ok(r) = text.parse::<Rational>() {
        assert!(r.denom().is_positive());
        let printed = r.to_string();
        assert_eq!(printed.parse::<Rational>().unwrap(), r);
    }
});
