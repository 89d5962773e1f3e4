//! Test case factories.
//!
//! Every factory returns a fresh `Vec`; nothing here holds state between
//! calls.

use codec::LimbLayout;
use num_bigint::BigUint;
use signer::{
    generate_ecdsa, generate_eddsa, EcdsaBackend, EddsaBackend, FieldHasher, SignatureRecord,
    SignerError,
};

use crate::signature_inputs::Tamper;

/// secp256k1 private keys of the default ECDSA cases, in decimal.
pub const ECDSA_PRIVATE_KEYS: [&str; 4] = [
    "88549154299169935420064281163296845505587953610183896504176354567359434168161",
    "37706893564732085918706190942542566344879680306879183356840008504374628845468",
    "90388020393783788847120091912026443124559466591761394939671630294477859800601",
    "110977009687373213104962226057480551605828725303063265716157300460694423838923",
];

pub const ECDSA_MESSAGE_HASH: u64 = 1234;

/// Baby Jubjub private key of the default EdDSA case.
pub const EDDSA_PRIVATE_KEY_HEX: &str =
    "0001020304050607080900010203040506070809000102030405060708090001";

pub const EDDSA_MESSAGE: u64 = 123;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Expectation {
    /// Every constraint must hold.
    Accept,
    /// Some constraint must be violated.
    Reject,
}

#[derive(Clone, Debug)]
pub struct TestCase {
    pub label: String,
    pub record: SignatureRecord,
    pub tamper: Option<Tamper>,
    pub expectation: Expectation,
}

impl TestCase {
    pub fn accept(label: impl Into<String>, record: SignatureRecord) -> Self {
        Self {
            label: label.into(),
            record,
            tamper: None,
            expectation: Expectation::Accept,
        }
    }

    pub fn reject(label: impl Into<String>, record: SignatureRecord, tamper: Tamper) -> Self {
        Self {
            label: label.into(),
            record,
            tamper: Some(tamper),
            expectation: Expectation::Reject,
        }
    }
}

/// An accepting case and an `r + 1` rejecting case per key.
pub fn ecdsa_cases<B, H>(
    backend: &B,
    hasher: &H,
    private_keys: &[BigUint],
    message_hash: &BigUint,
    layout: LimbLayout,
) -> Result<Vec<TestCase>, SignerError>
where
    B: EcdsaBackend + ?Sized,
    H: FieldHasher + ?Sized,
{
    let mut cases = Vec::with_capacity(2 * private_keys.len());
    for (i, key) in private_keys.iter().enumerate() {
        let record = generate_ecdsa(backend, hasher, key, message_hash, layout)?;
        cases.push(TestCase::reject(
            format!("ecdsa key #{i}: r + 1"),
            record.clone(),
            Tamper::IncrementR,
        ));
        cases.push(TestCase::accept(format!("ecdsa key #{i}"), record));
    }
    Ok(cases)
}

/// An accepting case and an `R8x + 1` rejecting case per key.
pub fn eddsa_cases<B, H>(
    backend: &B,
    hasher: &H,
    private_keys: &[Vec<u8>],
    message: &BigUint,
) -> Result<Vec<TestCase>, SignerError>
where
    B: EddsaBackend + ?Sized,
    H: FieldHasher + ?Sized,
{
    let mut cases = Vec::with_capacity(2 * private_keys.len());
    for (i, key) in private_keys.iter().enumerate() {
        let record = generate_eddsa(backend, hasher, key, message)?;
        cases.push(TestCase::reject(
            format!("eddsa key #{i}: R8x + 1"),
            record.clone(),
            Tamper::IncrementR,
        ));
        cases.push(TestCase::accept(format!("eddsa key #{i}"), record));
    }
    Ok(cases)
}

pub fn default_ecdsa_keys() -> Result<Vec<BigUint>, SignerError> {
    ECDSA_PRIVATE_KEYS
        .iter()
        .map(|key| {
            key.parse::<BigUint>()
                .map_err(|e| SignerError::InvalidKey(format!("{key}: {e}")))
        })
        .collect()
}

pub fn default_eddsa_key() -> Result<Vec<u8>, SignerError> {
    hex::decode(EDDSA_PRIVATE_KEY_HEX).map_err(|e| SignerError::InvalidKey(e.to_string()))
}

/// The default ECDSA cases, signed with the shipped backends.
pub fn default_ecdsa_cases(layout: LimbLayout) -> Result<Vec<TestCase>, SignerError> {
    ecdsa_cases(
        &signer::Secp256k1,
        &signer::CircomPoseidon,
        &default_ecdsa_keys()?,
        &BigUint::from(ECDSA_MESSAGE_HASH),
        layout,
    )
}

/// The default EdDSA cases, signed with the shipped backends.
pub fn default_eddsa_cases() -> Result<Vec<TestCase>, SignerError> {
    eddsa_cases(
        &signer::BabyJubJub::new(),
        &signer::CircomPoseidon,
        &[default_eddsa_key()?],
        &BigUint::from(EDDSA_MESSAGE),
    )
}
