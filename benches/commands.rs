//! Benchmarks for command execution throughput.

use std::borrow::Cow;
use std::time::Duration;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use modal_engine::{
    BufferError, Command, Engine, Motion, ObjectKind, Operator, Range, TextBuffer, TextObject,
};
use ropey::Rope;

/// Rope-based buffer for benchmarking.
struct BenchBuffer {
    rope: Rope,
}

impl BenchBuffer {
    fn new(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }
}

impl TextBuffer for BenchBuffer {
    fn len(&self) -> usize {
        self.rope.len_bytes()
    }

    fn slice(&self, range: Range) -> Result<Cow<'_, [u8]>, BufferError> {
        let start = self.rope.byte_to_char(range.start);
        let end = self.rope.byte_to_char(range.end);
        Ok(Cow::Owned(
            self.rope.slice(start..end).to_string().into_bytes(),
        ))
    }

    fn insert(&mut self, offset: usize, bytes: &[u8]) -> Result<(), BufferError> {
        let at = self.rope.byte_to_char(offset);
        self.rope
            .insert(at, std::str::from_utf8(bytes).unwrap_or(""));
        Ok(())
    }

    fn delete(&mut self, offset: usize, count: usize) -> Result<(), BufferError> {
        let start = self.rope.byte_to_char(offset);
        let end = self.rope.byte_to_char(offset + count);
        self.rope.remove(start..end);
        Ok(())
    }
}

fn generate_sample_text(lines: usize) -> String {
    let mut text = String::new();
    for i in 0..lines {
        text.push_str(&format!(
            "This is line {} with (some) \"sample\" text for benchmarking.\n",
            i + 1
        ));
        if i % 10 == 0 {
            text.push('\n'); // Blank lines for paragraph motions
        }
    }
    text
}

fn benchmark_simple_motions(c: &mut Criterion) {
    let text = generate_sample_text(1000);
    let mut buffer = BenchBuffer::new(&text);
    let mut engine = Engine::new();
    let mut cursor = 0usize;

    c.bench_function("simple motions (left/right/up/down)", |b| {
        b.iter(|| {
            for m in [
                Motion::Down,
                Motion::Down,
                Motion::Right,
                Motion::Right,
                Motion::Left,
                Motion::Up,
            ] {
                cursor = engine
                    .execute_command(&mut buffer, cursor, black_box(&Command::bare(m)))
                    .unwrap();
            }
        });
    });
}

fn benchmark_word_motions(c: &mut Criterion) {
    let text = generate_sample_text(1000);
    let mut buffer = BenchBuffer::new(&text);
    let mut engine = Engine::new();
    let mut cursor = 0usize;

    c.bench_function("word motions (forward/backward)", |b| {
        b.iter(|| {
            for m in [
                Motion::WordForward,
                Motion::WordForward,
                Motion::WordForward,
                Motion::WordBackward,
                Motion::WordForward,
            ] {
                cursor = engine
                    .execute_command(&mut buffer, cursor, black_box(&Command::bare(m)))
                    .unwrap();
            }
            // Stay away from the end of the buffer.
            if cursor + 200 > buffer.len() {
                cursor = 0;
            }
        });
    });
}

fn benchmark_counted_motions(c: &mut Criterion) {
    let text = generate_sample_text(1000);
    let mut buffer = BenchBuffer::new(&text);
    let mut engine = Engine::new();

    c.bench_function("counted motions (50 words)", |b| {
        b.iter(|| {
            let cmd = Command::bare(Motion::WordForward).count(50);
            let cur = engine
                .execute_command(&mut buffer, 0, black_box(&cmd))
                .unwrap();
            black_box(cur);
        });
    });
}

fn benchmark_delete_operations(c: &mut Criterion) {
    let text = generate_sample_text(1000);
    let mut engine = Engine::new();

    c.bench_function("delete operations (word/line)", |b| {
        b.iter(|| {
            let mut buffer = BenchBuffer::new(black_box(&text));
            let dw = Command::operator(Operator::Delete, Motion::WordForward);
            let cur = engine.execute_command(&mut buffer, 500, &dw).unwrap();
            let dd = Command::operator(Operator::Delete, Motion::LineEnd);
            let cur = engine.execute_command(&mut buffer, cur, &dd).unwrap();
            black_box(cur);
        });
    });
}

fn benchmark_text_objects(c: &mut Criterion) {
    let text = generate_sample_text(1000);
    let mut buffer = BenchBuffer::new(&text);
    let mut engine = Engine::new();
    // Offset of a '(' somewhere in the middle of the buffer.
    let paren = text.len() / 2 + text[text.len() / 2..].find('(').unwrap() + 1;

    c.bench_function("yank text objects (word/paren/quote)", |b| {
        b.iter(|| {
            for kind in [ObjectKind::Word, ObjectKind::Paren, ObjectKind::DoubleQuote] {
                let cmd = Command::object(Operator::Yank, TextObject::inner(kind));
                let _ = engine.execute_command(&mut buffer, black_box(paren), &cmd);
            }
        });
    });
}

fn benchmark_dot_repeat(c: &mut Criterion) {
    let text = generate_sample_text(1000);
    let mut engine = Engine::new();

    c.bench_function("dot repeat (delete word)", |b| {
        b.iter(|| {
            let mut buffer = BenchBuffer::new(black_box(&text));
            let dw = Command::operator(Operator::Delete, Motion::WordForward);
            let mut cur = engine.execute_command(&mut buffer, 0, &dw).unwrap();
            for _ in 0..10 {
                cur = engine.repeat_last(&mut buffer, cur).unwrap();
            }
            black_box(cur);
        });
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .measurement_time(Duration::from_secs(10))
        .sample_size(100);
    targets = benchmark_simple_motions,
              benchmark_word_motions,
              benchmark_counted_motions,
              benchmark_delete_operations,
              benchmark_text_objects,
              benchmark_dot_repeat
}
criterion_main!(benches);
