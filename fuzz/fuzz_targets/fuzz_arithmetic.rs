#![no_main]

use libfuzzer_sys::fuzz_target;
use num_bigint::BigInt;
use num_integer::Integer;

use tessera_numeric::BigInteger;

/// Split the input in two and read each half as a signed decimal number.
fn operands(data: &[u8]) -> Option<(String, String)> {
    if data.len() < 2 {
        return None;
    }
    let (a, b) = data.split_at(data.len() / 2);
    let render = |bytes: &[u8]| {
        let sign = if bytes[0] & 1 == 1 { "-" } else { "" };
        let digits: String = bytes[1..]
            .iter()
            .map(|b| char::from(b'0' + b % 10))
            .collect();
        if digits.is_empty() {
            "0".to_string()
        } else {
            format!("{sign}{digits}")
        }
    };
    Some((render(a), render(b)))
}

fuzz_target!(|data: &[u8]| {
    let Some((a, b)) = operands(data) else {
        return;
    };
    let (x, y): (BigInteger, BigInteger) = (a.parse().unwrap(), b.parse().unwrap());
    let (rx, ry): (BigInt, BigInt) = (a.parse().unwrap(), b.parse().unwrap());

    assert_eq!((&x + &y).to_string(), (&rx + &ry).to_string());
    assert_eq!((&x - &y).to_string(), (&rx - &ry).to_string());
    assert_eq!((&x * &y).to_string(), (&rx * &ry).to_string());
    assert_eq!(x.cmp(&y), rx.cmp(&ry));

    if !y.is_zero() {
        // num-bigint's `/` and `%` also truncate toward zero
        let (q, r) = x.div_rem(&y);
        let (rq, rr) = rx.div_rem(&ry);
        assert_eq!(q.to_string(), rq.to_string());
        assert_eq!(r.to_string(), rr.to_string());
    } else {
        assert!(x.checked_div(&y).is_none());
    }
});
