use codec::{from_limbs, restride, to_bytes32, to_limbs, BigUint};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

fn random_256(rng: &mut StdRng) -> BigUint {
    let mut bytes = [0u8; 32];
    rng.fill_bytes(&mut bytes);
    BigUint::from_bytes_be(&bytes)
}

fn bench_limbs(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let x = random_256(&mut rng);
    let limbs = to_limbs(&x, 64, 4).expect("encode");

    c.bench_function("to_limbs_64x4", |bencher| {
        bencher.iter(|| black_box(to_limbs(black_box(&x), 64, 4).expect("encode")))
    });
    c.bench_function("from_limbs_64x4", |bencher| {
        bencher.iter(|| black_box(from_limbs(black_box(limbs.as_slice()), 64).expect("decode")))
    });
}

fn bench_bytes_and_restride(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let x = random_256(&mut rng);

    c.bench_function("to_bytes32", |bencher| {
        bencher.iter(|| black_box(to_bytes32(black_box(&x)).expect("encode")))
    });
    c.bench_function("restride_8_to_64", |bencher| {
        bencher.iter(|| black_box(restride(black_box(&x), 8, 64).expect("restride")))
    });
}

criterion_group!(benches, bench_limbs, bench_bytes_and_restride);
criterion_main!(benches);
