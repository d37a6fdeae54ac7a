use criterion::{black_box, criterion_group, criterion_main, Criterion};

use rolld::{command::DiceCommand, counter::MemoryCounter, dice::roller::FastRand, evaluate_dice_command};

fn bench_e2e(c: &mut Criterion) {
	c.bench_function("e2e_basic", |b| b.iter(|| evaluate_dice_command(black_box("4d8+4"))));
	c.bench_function("e2e_success_count", |b| b.iter(|| evaluate_dice_command(black_box("10d10cd6"))));

	let mut command = DiceCommand::new(FastRand::default(), MemoryCounter::default());
	c.bench_function("e2e_command_advantage", |b| b.iter(|| command.run(black_box("2d20adv+3"))));
	c.bench_function("e2e_command_message", |b| {
		b.iter(|| command.handle_message(black_box("good luck with 1d20 rolls")))
	});
}

criterion_group!(benches, bench_e2e);
criterion_main!(benches);
