use std::sync::Arc;
use std::thread;
use std::time::Duration;

use circuit::{
    assignment_for, default_ecdsa_cases, default_ecdsa_keys, default_eddsa_cases,
    default_eddsa_key, load_circuit, CaseState, Circuit, CircuitError, CircuitHandle, Constraint,
    ConstraintSystem, EcdsaVerifyCircuit, EddsaPoseidonCircuit, Expectation, HarnessError,
    InputAssignment, InputBinding, InputSpec, Shape, SignalLayout, Suite, SuiteConfig, SuiteReport,
    Tamper, TestCase, Witness, ECDSA_MESSAGE_HASH, EDDSA_MESSAGE,
};
use codec::LimbLayout;
use num_bigint::BigUint;
use signer::{generate_ecdsa, generate_eddsa, BabyJubJub, CircomPoseidon, Secp256k1, SignatureRecord};

const ECDSA_DESCRIPTOR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/circuits/ecdsa_64_4.json");
const EDDSA_DESCRIPTOR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/circuits/eddsa_poseidon.json");

fn ecdsa_record(key_index: usize) -> SignatureRecord {
    let keys = default_ecdsa_keys().unwrap();
    generate_ecdsa(
        &Secp256k1,
        &CircomPoseidon,
        &keys[key_index],
        &BigUint::from(ECDSA_MESSAGE_HASH),
        LimbLayout::U64X4,
    )
    .unwrap()
}

fn eddsa_record() -> SignatureRecord {
    generate_eddsa(
        &BabyJubJub::new(),
        &CircomPoseidon,
        &default_eddsa_key().unwrap(),
        &BigUint::from(EDDSA_MESSAGE),
    )
    .unwrap()
}

fn check(circuit: &dyn Circuit, inputs: &InputAssignment) -> Result<(), CircuitError> {
    let witness = circuit.evaluate(inputs)?;
    circuit.check_constraints(&witness)
}

fn serial(circuit: &str) -> SuiteConfig {
    SuiteConfig {
        circuit: circuit.into(),
        parallel: false,
        ..SuiteConfig::default()
    }
}

#[test]
fn ecdsa_accepts_every_default_key() {
    let circuit = load_circuit(ECDSA_DESCRIPTOR).unwrap();
    for i in 0..4 {
        let inputs = assignment_for(&ecdsa_record(i), LimbLayout::U64X4, None).unwrap();
        check(&*circuit, &inputs).unwrap_or_else(|e| panic!("key #{i}: {e}"));
    }
}

#[test]
fn ecdsa_rejects_incremented_r() {
    let circuit = EcdsaVerifyCircuit::new(LimbLayout::U64X4).unwrap();
    let inputs =
        assignment_for(&ecdsa_record(0), LimbLayout::U64X4, Some(Tamper::IncrementR)).unwrap();

    match check(&circuit, &inputs) {
        Err(CircuitError::ConstraintUnsatisfiable { constraint, .. }) => {
            assert!(constraint.starts_with("ECDSA"), "{constraint}")
        }
        other => panic!("expected an unsatisfied constraint, got {other:?}"),
    }
}

#[test]
fn ecdsa_rejects_wrong_pubkey_hash() {
    let circuit = EcdsaVerifyCircuit::new(LimbLayout::U64X4).unwrap();
    let record = ecdsa_record(1);
    let mut inputs = assignment_for(&record, LimbLayout::U64X4, None).unwrap();
    inputs.insert(
        "sender_pubkey_hash",
        record.public_key_hash() + BigUint::from(1u8),
    );

    assert_eq!(
        check(&circuit, &inputs),
        Err(CircuitError::ConstraintUnsatisfiable {
            circuit: circuit.name().to_string(),
            constraint: "sender_pubkey_hash == Poseidon(sender_pubkey)".to_string(),
        })
    );
}

#[test]
fn ecdsa_with_other_limb_layout() {
    let layout = LimbLayout::new(43, 6);
    let record = generate_ecdsa(
        &Secp256k1,
        &CircomPoseidon,
        &default_ecdsa_keys().unwrap()[2],
        &BigUint::from(ECDSA_MESSAGE_HASH),
        layout,
    )
    .unwrap();
    let circuit = EcdsaVerifyCircuit::new(layout).unwrap();

    check(&circuit, &assignment_for(&record, layout, None).unwrap()).unwrap();
}

#[test]
fn ecdsa_shape_mismatches() {
    let circuit = EcdsaVerifyCircuit::new(LimbLayout::U64X4).unwrap();
    let record = ecdsa_record(0);
    let honest = assignment_for(&record, LimbLayout::U64X4, None).unwrap();

    // Three limbs where four are declared.
    let short = assignment_for(&record, LimbLayout::new(86, 3), None).unwrap();
    match circuit.evaluate(&short) {
        Err(CircuitError::ShapeMismatch {
            expected, found, ..
        }) => {
            assert_eq!(expected, "[4]");
            assert_eq!(found, "[3]");
        }
        other => panic!("expected a shape mismatch, got {other:?}"),
    }

    let mut missing = honest.clone();
    missing.remove("msghash");
    assert!(matches!(
        circuit.evaluate(&missing),
        Err(CircuitError::ShapeMismatch { signal, .. }) if signal == "msghash"
    ));

    let extra = honest.with("nonce", BigUint::from(7u8));
    assert!(matches!(
        circuit.evaluate(&extra),
        Err(CircuitError::ShapeMismatch { signal, .. }) if signal == "nonce"
    ));
}

#[test]
fn ecdsa_tampered_witness_is_rejected() {
    let circuit = EcdsaVerifyCircuit::new(LimbLayout::U64X4).unwrap();
    let inputs = assignment_for(&ecdsa_record(3), LimbLayout::U64X4, None).unwrap();
    let mut witness = circuit.evaluate(&inputs).unwrap();
    circuit.check_constraints(&witness).unwrap();

    let limb = witness.get("s[0]").cloned().unwrap();
    witness.overwrite("s[0]", limb + BigUint::from(1u8)).unwrap();
    assert!(matches!(
        circuit.check_constraints(&witness),
        Err(CircuitError::ConstraintUnsatisfiable { .. })
    ));
}

#[test]
fn eddsa_accepts_default_vector() {
    let circuit = load_circuit(EDDSA_DESCRIPTOR).unwrap();
    let inputs = assignment_for(&eddsa_record(), LimbLayout::U64X4, None).unwrap();

    check(&*circuit, &inputs).unwrap();
}

#[test]
fn eddsa_rejects_tampering() {
    let circuit = EddsaPoseidonCircuit::new();
    let record = eddsa_record();
    for tamper in [
        Tamper::IncrementR,
        Tamper::IncrementS,
        Tamper::IncrementMessage,
    ] {
        let inputs = assignment_for(&record, LimbLayout::U64X4, Some(tamper)).unwrap();
        assert_eq!(
            check(&circuit, &inputs),
            Err(CircuitError::ConstraintUnsatisfiable {
                circuit: EddsaPoseidonCircuit::NAME.to_string(),
                constraint: "S*G == R8 + 8*hm*A".to_string(),
            }),
            "{tamper:?}"
        );
    }
}

#[test]
fn eddsa_rejects_ecdsa_inputs() {
    let circuit = EddsaPoseidonCircuit::new();
    let inputs = assignment_for(&ecdsa_record(0), LimbLayout::U64X4, None).unwrap();

    assert!(matches!(
        circuit.evaluate(&inputs),
        Err(CircuitError::ShapeMismatch { .. })
    ));
}

#[test]
fn suite_runs_default_cases() {
    let ecdsa = Suite::from_config(serial(ECDSA_DESCRIPTOR)).unwrap();
    let report = ecdsa.run(default_ecdsa_cases(LimbLayout::U64X4).unwrap());
    assert_eq!(report.cases.len(), 8);
    report.ensure_passed().unwrap();

    let eddsa = Suite::from_config(serial(EDDSA_DESCRIPTOR)).unwrap();
    let report = eddsa.run(default_eddsa_cases().unwrap());
    assert_eq!(report.passed(), 2);
    report.ensure_passed().unwrap();
}

#[test]
fn suite_parallel_matches_serial() {
    let cases = default_ecdsa_cases(LimbLayout::U64X4).unwrap();
    let sequential = Suite::from_config(serial(ECDSA_DESCRIPTOR))
        .unwrap()
        .run(cases.clone());
    let parallel = Suite::from_config(SuiteConfig {
        parallel: true,
        ..serial(ECDSA_DESCRIPTOR)
    })
    .unwrap()
    .run(cases);

    let states = |report: &SuiteReport| {
        report
            .cases
            .iter()
            .map(|c| (c.label.clone(), c.state.clone()))
            .collect::<Vec<_>>()
    };
    assert_eq!(states(&sequential), states(&parallel));
}

#[test]
fn suite_reports_wrong_circuit() {
    // EdDSA vectors against the ECDSA circuit fail with a shape mismatch,
    // which does not count as a rejection.
    let suite = Suite::from_config(serial(ECDSA_DESCRIPTOR)).unwrap();
    let report = suite.run(default_eddsa_cases().unwrap());

    assert_eq!(report.passed(), 0);
    assert!(report.cases.iter().all(|c| matches!(
        c.state,
        CaseState::Failed {
            error: CircuitError::ShapeMismatch { .. },
            ..
        }
    )));
    match report.ensure_passed() {
        Err(HarnessError::CasesFailed { failed, total, first }) => {
            assert_eq!((failed, total), (2, 2));
            assert!(first.contains("0x000102030405"), "{first}");
        }
        other => panic!("expected failed cases, got {other:?}"),
    }
}

#[test]
fn suite_zero_deadline_times_out() {
    let suite = Suite::from_config(SuiteConfig {
        deadline_secs: 0,
        ..serial(ECDSA_DESCRIPTOR)
    })
    .unwrap();
    let report = suite.run(default_ecdsa_cases(LimbLayout::U64X4).unwrap());

    assert!(report.timed_out);
    assert!(report.cases.iter().all(|c| c.state == CaseState::TimedOut));
    assert!(matches!(
        report.ensure_passed(),
        Err(HarnessError::SuiteTimeout(_))
    ));
}

/// Binds the EdDSA inputs but only requires `msg < 124`.
struct MessageBound {
    inputs: Vec<InputSpec>,
    bindings: Vec<InputBinding>,
    layout: Arc<SignalLayout>,
    constraints: ConstraintSystem,
}

impl MessageBound {
    fn new() -> Self {
        let mut layout = SignalLayout::new();
        let inputs: Vec<InputSpec> = ["Ax", "Ay", "R8x", "R8y", "S", "msg", "sender_pubkey_hash"]
            .into_iter()
            .map(|name| InputSpec::new(name, Shape::Scalar))
            .collect();
        let bindings: Vec<InputBinding> =
            inputs.iter().cloned().map(|spec| layout.bind(spec)).collect();

        let mut constraints = ConstraintSystem::new();
        constraints.add(
            "msg < 124",
            Constraint::LessThan {
                signal: bindings[5].signals[0],
                bound: BigUint::from(124u8),
            },
        );
        Self {
            inputs,
            bindings,
            layout: Arc::new(layout),
            constraints,
        }
    }
}

impl Circuit for MessageBound {
    fn name(&self) -> &str {
        "message_bound"
    }

    fn inputs(&self) -> &[InputSpec] {
        &self.inputs
    }

    fn constraints(&self) -> &ConstraintSystem {
        &self.constraints
    }

    fn evaluate(&self, inputs: &InputAssignment) -> Result<Witness, CircuitError> {
        let mut witness = Witness::new(Arc::clone(&self.layout));
        witness.bind_inputs(&self.bindings, inputs)?;
        Ok(witness)
    }

    fn check_constraints(&self, witness: &Witness) -> Result<(), CircuitError> {
        self.constraints.check(self.name(), witness)
    }
}

#[test]
fn suite_runs_against_custom_circuit() {
    let handle = CircuitHandle::new(MessageBound::new());
    assert!(format!("{handle:?}").contains("message_bound"));

    let suite = Suite::new(handle, SuiteConfig::default()).unwrap();
    let record = eddsa_record();
    let cases = vec![
        TestCase::accept("accept", record.clone()),
        TestCase::reject("msg + 1", record.clone(), Tamper::IncrementMessage),
        TestCase::reject("S + 1", record, Tamper::IncrementS),
    ];
    let report = suite.run(cases);

    assert_eq!(report.circuit, "message_bound");
    assert_eq!(report.cases[0].state, CaseState::Checked);
    assert_eq!(report.cases[0].expectation, Expectation::Accept);
    assert!(report.cases[1].passed());
    // Not covered by the fake's constraints.
    assert_eq!(report.cases[2].state, CaseState::Checked);
    assert!(!report.cases[2].passed());
}

#[test]
fn case_report_serializes_reproduction_data() {
    let suite = Suite::from_config(serial(EDDSA_DESCRIPTOR)).unwrap();
    let report = suite.run(default_eddsa_cases().unwrap());
    let json = serde_json::to_value(&report).unwrap();

    let case = &json["cases"][1];
    assert_eq!(case["message"], "123");
    assert_eq!(case["inputs"]["msg"], "123");
    assert_eq!(case["state"], "checked");
}

#[test]
fn suite_config_resolves_circuit_relative_to_file() {
    let dir = std::env::temp_dir().join(format!("suite-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("suite.json");
    std::fs::write(&path, r#"{ "circuit": "ecdsa.json", "deadline_secs": 5 }"#).unwrap();

    let config = SuiteConfig::from_file(&path).unwrap();
    assert_eq!(config.circuit, dir.join("ecdsa.json"));
    assert_eq!(config.deadline().as_secs(), 5);

    std::fs::remove_dir_all(&dir).unwrap();
}

/// Delegates to another circuit but stalls before checking constraints.
struct Stalling {
    inner: CircuitHandle,
    delay: Duration,
}

impl Circuit for Stalling {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn inputs(&self) -> &[InputSpec] {
        self.inner.inputs()
    }

    fn constraints(&self) -> &ConstraintSystem {
        self.inner.constraints()
    }

    fn limbs(&self) -> Option<LimbLayout> {
        self.inner.limbs()
    }

    fn evaluate(&self, inputs: &InputAssignment) -> Result<Witness, CircuitError> {
        self.inner.evaluate(inputs)
    }

    fn check_constraints(&self, witness: &Witness) -> Result<(), CircuitError> {
        thread::sleep(self.delay);
        self.inner.check_constraints(witness)
    }
}

#[test]
fn suite_flags_case_finishing_past_deadline() {
    let handle = CircuitHandle::new(Stalling {
        inner: load_circuit(ECDSA_DESCRIPTOR).unwrap(),
        delay: Duration::from_millis(1500),
    });
    let suite = Suite::new(
        handle,
        SuiteConfig {
            deadline_secs: 1,
            ..serial(ECDSA_DESCRIPTOR)
        },
    )
    .unwrap();
    let accept = default_ecdsa_cases(LimbLayout::U64X4)
        .unwrap()
        .pop()
        .unwrap();
    let report = suite.run(vec![accept]);

    assert!(report.timed_out);
    assert_eq!(report.cases[0].state, CaseState::Checked);
    assert!(report.cases[0].overran);
    assert!(matches!(
        report.ensure_passed(),
        Err(HarnessError::SuiteTimeout(_))
    ));
}

#[test]
fn suite_rejects_limb_layout_mismatch() {
    let wide = LimbLayout::new(65, 4);
    let handle = CircuitHandle::new(EcdsaVerifyCircuit::new(wide).unwrap());
    assert!(matches!(
        Suite::new(handle, SuiteConfig::default()),
        Err(HarnessError::LayoutMismatch { circuit, config })
            if circuit == wide && config == LimbLayout::U64X4
    ));

    let loaded = Suite::from_config(SuiteConfig {
        limbs: LimbLayout::new(43, 6),
        ..serial(ECDSA_DESCRIPTOR)
    });
    assert!(matches!(loaded, Err(HarnessError::LayoutMismatch { .. })));

    // Circuits without limb inputs accept any encoding layout.
    let eddsa = Suite::from_config(SuiteConfig {
        limbs: LimbLayout::new(43, 6),
        ..serial(EDDSA_DESCRIPTOR)
    });
    assert!(eddsa.is_ok());
}
