use criterion::{criterion_group, criterion_main, Criterion};

use helpers::stream::create_stream;
use rand::thread_rng;
use score_index::base::Len;
use score_index::score::reader::ScoreIndexReader;
use score_index::score::selector::TopEntries;
use score_index::score::writer::ScoreIndexWriter;
use score_index::utils::buffer::CountingWriter;

fn criterion_benchmark(c: &mut Criterion) {
    let mut rng = thread_rng();

    // A long stream: after warm-up, almost every admission hits the O(1)
    // rejection path
    const NUM_POSTINGS: usize = 100_000;
    let stream = create_stream(NUM_POSTINGS, &mut rng);

    c.bench_function("admit", |b| {
        b.iter(|| {
            let mut top = TopEntries::new();
            for entry in stream.iter() {
                top.admit(*entry);
            }
            top.len()
        })
    });

    c.bench_function("finalize_and_read", |b| {
        b.iter(|| {
            let mut writer = ScoreIndexWriter::new(CountingWriter::new(Vec::new()));
            for entry in stream.iter().take(1000) {
                writer
                    .add_entry(entry.score, entry.offset, entry.docid)
                    .expect("Error while adding an entry");
            }
            writer.finalize().expect("Error while finalizing");

            let buffer = writer.into_inner();
            let reader = ScoreIndexReader::open(&buffer).expect("Error while opening the buffer");
            reader.count()
        })
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().significance_level(0.1).sample_size(100);
    targets = criterion_benchmark
}
criterion_main!(benches);
