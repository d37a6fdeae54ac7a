use criterion::{black_box, criterion_group, criterion_main, Criterion};

use rolld::dice::{
	roller::{FastRand, Roller},
	DieRoll, Mode, RollOutcome, RollSpec,
};

fn bench_roll(c: &mut Criterion) {
	let mut rng = FastRand::default();

	let spec = RollSpec::new(4, 8);
	c.bench_function("roll_4d8", |b| b.iter(|| rng.roll(black_box(&spec))));

	let spec = RollSpec::sum(1, 20, Mode::Advantage, 5);
	c.bench_function("roll_1d20adv+5", |b| b.iter(|| rng.roll(black_box(&spec))));

	let spec = RollSpec::new(100, 1000);
	c.bench_function("roll_100d1000", |b| b.iter(|| rng.roll(black_box(&spec))));

	let spec = RollSpec::sum(100, 20, Mode::Disadvantage, -3);
	c.bench_function("roll_100d20dis-3", |b| b.iter(|| rng.roll(black_box(&spec))));

	let spec = RollSpec::success_count(100, 10, 6);
	c.bench_function("roll_100d10cd6", |b| b.iter(|| rng.roll(black_box(&spec))));
}

fn bench_describe(c: &mut Criterion) {
	let spec = RollSpec::sum(4, 8, Mode::Normal, 4);
	let outcome = RollOutcome::from_rolls(spec, [3, 7, 1, 8].into_iter().map(DieRoll::Single).collect());
	c.bench_function("describe_4d8+4", |b| b.iter(|| black_box(&outcome).describe("4d8+4")));

	let spec = RollSpec::sum(100, 20, Mode::Advantage, 0);
	let outcome = FastRand::default().roll(&spec);
	c.bench_function("describe_100d20adv", |b| b.iter(|| black_box(&outcome).describe("100d20adv")));
}

criterion_group!(benches, bench_roll, bench_describe);
criterion_main!(benches);
