use criterion::{black_box, criterion_group, criterion_main, Criterion};
use luma::{Event, EventKind, Translator};

/// Event stream for `n` straight-line assignments `x{i} = i + i`
fn assignment_stream(n: usize) -> Vec<Event> {
    let mut events = Vec::with_capacity(n * 4);
    for i in 0..n {
        events.push(Event::at(i + 1, EventKind::Int(i.to_string())));
        events.push(Event::at(i + 1, EventKind::Int(i.to_string())));
        events.push(Event::at(i + 1, EventKind::Add));
        events.push(Event::at(i + 1, EventKind::Assign(format!("x{i}"))));
    }
    events
}

fn translate_benchmark(c: &mut Criterion) {
    let events = assignment_stream(1_000);

    c.bench_function("translate 1k assignments", |b| {
        b.iter(|| {
            let mut translator = Translator::new();
            for event in black_box(&events) {
                translator.handle(event.clone()).unwrap();
            }
            translator.finish().unwrap()
        })
    });
}

fn boolean_benchmark(c: &mut Criterion) {
    let mut events = Vec::new();
    for i in 0..200 {
        events.push(Event::at(i + 1, EventKind::Bool(true)));
        events.push(Event::at(i + 1, EventKind::Bool(false)));
        events.push(Event::at(i + 1, EventKind::And));
        events.push(Event::at(i + 1, EventKind::Assign(format!("b{i}"))));
    }

    c.bench_function("translate 200 short-circuit merges", |b| {
        b.iter(|| {
            let mut translator = Translator::new();
            for event in black_box(&events) {
                translator.handle(event.clone()).unwrap();
            }
            translator.finish().unwrap()
        })
    });
}

criterion_group!(benches, translate_benchmark, boolean_benchmark);
criterion_main!(benches);
