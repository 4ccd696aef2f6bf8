//! Properties every scheme shares, exercised through `ThresholdSecretSharingScheme` only.

use rand::rngs::StdRng;
use rand::seq::index;
use rand::{thread_rng, Rng, SeedableRng};

use crate::{
    AsmuthBloomSecretSharing, BlakelySecretSharing, Operation, Parameters, SchemeState, ShamirSecretSharing,
    SharingError, ThresholdSecretSharingScheme,
};

const SECURITY_LEVELS: [usize; 4] = [64, 128, 256, 512];

/// Deal shares and check that random `threshold`-subsets in random order recover the secret while subsets one share
/// short are rejected.
fn check_round_trips<S>(mut scheme: S, samples: usize)
where
    S: ThresholdSecretSharingScheme,
    S::Share: Clone,
{
    let threshold = scheme.parameters().threshold();
    let parties = scheme.parameters().parties();

    assert_eq!(scheme.state(), SchemeState::Initialized);
    scheme.generate_secret().unwrap();
    assert_eq!(scheme.state(), SchemeState::SecretSet);
    scheme.generate_shares().unwrap();
    assert_eq!(scheme.state(), SchemeState::SharesGenerated);

    let shares = scheme.shares().unwrap();
    assert_eq!(shares.len(), parties);
    assert!(scheme.modulus().is_some());
    let secret = scheme.secret_value().unwrap().clone();
    assert!(secret.bits() as usize <= scheme.parameters().security());

    let mut rng = thread_rng();
    for _ in 0..samples {
        let size = rng.gen_range(threshold..=parties);
        let subset: Vec<S::Share> = index::sample(&mut rng, parties, size)
            .into_iter()
            .map(|i| shares[i].clone())
            .collect();
        assert_eq!(scheme.recover_secret(&subset).unwrap(), secret);

        assert_eq!(
            scheme.recover_secret(&subset[..threshold - 1]),
            Err(SharingError::InsufficientShares {
                required: threshold,
                provided: threshold - 1
            })
        );
    }

    assert!(scheme.verify_recovery().unwrap());
}

fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

#[test]
fn test_shamir_round_trips() {
    for (seed, &security) in SECURITY_LEVELS.iter().enumerate() {
        for &(threshold, parties) in &[(2, 2), (3, 5), (5, 8)] {
            let parameters = Parameters::new(threshold, parties, security).unwrap();
            check_round_trips(ShamirSecretSharing::with_rng(parameters, seeded(seed as u64)), 6);
        }
    }
}

#[test]
fn test_blakely_round_trips() {
    for (seed, &security) in SECURITY_LEVELS.iter().enumerate() {
        for &(threshold, parties) in &[(2, 3), (3, 5), (4, 6)] {
            let parameters = Parameters::new(threshold, parties, security).unwrap();
            check_round_trips(BlakelySecretSharing::with_rng(parameters, seeded(seed as u64)), 6);
        }
    }
}

#[test]
fn test_asmuth_bloom_round_trips() {
    for (seed, &security) in SECURITY_LEVELS.iter().enumerate() {
        for &(threshold, parties) in &[(2, 2), (3, 5), (4, 7)] {
            let parameters = Parameters::new(threshold, parties, security).unwrap();
            check_round_trips(AsmuthBloomSecretSharing::with_rng(parameters, seeded(seed as u64)), 6);
        }
    }
}

#[test]
fn test_os_seeded_instances() {
    check_round_trips(ShamirSecretSharing::new(3, 6, 128).unwrap(), 3);
    check_round_trips(BlakelySecretSharing::new(3, 6, 128).unwrap(), 3);
    check_round_trips(AsmuthBloomSecretSharing::new(3, 6, 128).unwrap(), 3);
}

/// Drive a fresh instance through every out-of-order call.
fn check_lifecycle_errors<S: ThresholdSecretSharingScheme>(mut scheme: S) {
    let missing_secret = Err(SharingError::MissingPrerequisite {
        operation: Operation::GenerateShares,
        prerequisite: Operation::GenerateSecret,
    });
    let missing_shares = Err(SharingError::MissingPrerequisite {
        operation: Operation::RecoverSecret,
        prerequisite: Operation::GenerateShares,
    });

    assert_eq!(scheme.generate_shares(), missing_secret);
    assert_eq!(scheme.recover_secret(&[]), missing_shares);
    assert!(matches!(
        scheme.verify_recovery(),
        Err(SharingError::MissingPrerequisite { .. })
    ));
    assert!(scheme.secret().is_none());
    assert!(scheme.shares().is_none());

    scheme.generate_secret().unwrap();
    assert_eq!(
        scheme.generate_secret(),
        Err(SharingError::DuplicateOperation(Operation::GenerateSecret))
    );
    assert_eq!(scheme.recover_secret(&[]), missing_shares);

    scheme.generate_shares().unwrap();
    assert_eq!(
        scheme.generate_shares(),
        Err(SharingError::DuplicateOperation(Operation::GenerateShares))
    );
    assert_eq!(
        scheme.generate_secret(),
        Err(SharingError::DuplicateOperation(Operation::GenerateSecret))
    );
    assert_eq!(scheme.state(), SchemeState::SharesGenerated);
}

#[test]
fn test_lifecycle_errors() {
    let parameters = Parameters::new(2, 4, 64).unwrap();
    check_lifecycle_errors(ShamirSecretSharing::with_rng(parameters, seeded(1)));
    check_lifecycle_errors(BlakelySecretSharing::with_rng(parameters, seeded(2)));
    check_lifecycle_errors(AsmuthBloomSecretSharing::with_rng(parameters, seeded(3)));
}

#[test]
fn test_invalid_parameters_are_rejected() {
    assert!(matches!(
        ShamirSecretSharing::new(1, 3, 64),
        Err(SharingError::InvalidParameters { .. })
    ));
    assert!(matches!(
        BlakelySecretSharing::new(4, 3, 64),
        Err(SharingError::InvalidParameters { .. })
    ));
    assert!(matches!(
        AsmuthBloomSecretSharing::new(2, 3, 1024),
        Err(SharingError::InvalidParameters { .. })
    ));
}
