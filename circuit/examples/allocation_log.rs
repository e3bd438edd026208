//! An example to show how the allocation log works.
//!
//! *NOTE*: The example must be run in debug mode or with a custom profile
//! that enables debug_assertions, and with `RUST_LOG=DEBUG` for tracing.

use gkr_circuit::{CompileConfig, LeafInfo, Root, SubCircuitId, SubCircuitLookup};
use p3_baby_bear::BabyBear;
use p3_field::{PrimeCharacteristicRing, PrimeField64};
use tracing_forest::ForestLayer;
use tracing_forest::util::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

type F = BabyBear;

/// Registry key of the `x * y + c` block.
const MUL_ADD: SubCircuitId = SubCircuitId(1);

fn init_logger() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    Registry::default()
        .with(env_filter)
        .with(ForestLayer::default())
        .init();
}

fn main() {
    init_logger();

    println!("Describing a circuit to demonstrate the allocation log...\n");

    let mut root = Root::<F>::new(F::ORDER_U64, CompileConfig::new().with_capacity(8))
        .expect("BabyBear modulus is supported");

    let a = root.public_variable(&LeafInfo::public("in.a")).unwrap();
    let b = root.secret_variable(&LeafInfo::secret("in.b")).unwrap();
    let _c = root.secret_variable("in.c").unwrap();

    // The block is described on first use only; later uses hit the registry.
    for round in 0..3 {
        match root.get_or_create_sub_circuit(MUL_ADD).unwrap() {
            SubCircuitLookup::Created(id) => {
                root.sub_circuit_input(id, "x").unwrap();
                root.sub_circuit_input(id, "y").unwrap();
                let out = root.sub_circuit_internal(id, "x*y+c").unwrap();
                root.mark_output(id, out.as_variable().unwrap()).unwrap();
                println!("round {round}: described {id}");
            }
            SubCircuitLookup::Existing(id) => println!("round {round}: reused {id}"),
        }
    }

    let combo = a.clone() * F::TWO - b.clone() + root.constant(F::from_u64(7));
    println!("combination has {} terms\n", combo.len());

    root.dump_allocation_log();
    root.dump_variables(&[a.as_variable().unwrap(), root.constant_one_wire()]);

    let description = root.finish();
    println!(
        "\n{} variables, {} public, {} sub-circuits",
        description.variable_count,
        description.public_variables.len(),
        description.registry.len()
    );
}
