use circular_buffer::CircularBuffer;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn criterion_benchmarks(c: &mut Criterion) {
    c.bench_function("bench_new", |b| {
        b.iter(|| {
            let ring: CircularBuffer<i32> = CircularBuffer::new();
            black_box(ring);
        })
    });

    c.bench_function("bench_grow_1025", |b| {
        b.iter(|| {
            let mut ring = CircularBuffer::new();
            for i in 0..1025 {
                ring.push_front(i);
            }
            black_box(ring);
        })
    });

    c.bench_function("bench_fifo_1000", |b| {
        let mut ring = CircularBuffer::with_capacity(16);
        b.iter(|| {
            for i in 0..1000 {
                ring.push_back(i);
                if ring.len() > 8 {
                    black_box(ring.pop_front());
                }
            }
            ring.clear();
        })
    });

    let ring: CircularBuffer<_> = (0..1000).collect();
    c.bench_function("bench_iter_1000", |b| {
        b.iter(|| {
            let mut sum = 0;
            for &i in &ring {
                sum += i;
            }
            black_box(sum);
        })
    });

    let mut ring: CircularBuffer<_> = (0..1000).collect();
    c.bench_function("bench_mut_iter_1000", |b| {
        b.iter(|| {
            let mut sum = 0;
            for i in &mut ring {
                sum += *i;
            }
            black_box(sum);
        })
    });

    let ring: CircularBuffer<_> = (0..1000).collect();
    c.bench_function("bench_cursor_walk_1000", |b| {
        b.iter(|| {
            let mut sum = 0;
            let mut it = ring.begin();
            while it != ring.end() {
                sum += it.get().copied().unwrap_or(0);
                it.move_next();
            }
            black_box(sum);
        })
    });

    let ring: CircularBuffer<_> = (0..1000).collect();
    c.bench_function("bench_index_1000", |b| {
        b.iter(|| {
            let mut sum = 0;
            for i in 0..ring.len() {
                sum += ring[i];
            }
            black_box(sum);
        })
    });

    let ring: CircularBuffer<String> = (0..1000).map(|i| i.to_string()).collect();
    c.bench_function("bench_clone_strings_1000", |b| b.iter(|| black_box(ring.clone())));

    const N: usize = 1000;
    let mut array: [usize; N] = [0; N];
    for i in 0..N {
        array[i] = i;
    }
    c.bench_function("bench_from_array_1000", |b| {
        b.iter(|| {
            let ring: CircularBuffer<_> = array.into();
            black_box(ring);
        })
    });

    let mut ring: CircularBuffer<u16> = (0..1000).collect();
    c.bench_function("bench_insert_erase_middle", |b| {
        b.iter(|| {
            ring.insert(black_box(300), 7);
            black_box(ring.erase(black_box(700)));
        })
    });

    let mut ring: CircularBuffer<u16> = (0..1000).collect();
    c.bench_function("bench_insert_erase_near_front", |b| {
        b.iter(|| {
            ring.insert(black_box(10), 7);
            black_box(ring.erase(black_box(10)));
        })
    });

    let mut ring: CircularBuffer<u16> = CircularBuffer::with_capacity(1000);
    c.bench_function("bench_erase_range_512", |b| {
        b.iter(|| {
            ring.clear();
            ring.extend(black_box(0..768));
            ring.erase_range(black_box(128..640));
        })
    });

    let mut ring: CircularBuffer<u8> = CircularBuffer::with_capacity(1000);
    let input: &[u8] = &[128; 512];
    c.bench_function("bench_extend_bytes", |b| {
        b.iter(|| {
            ring.clear();
            ring.extend(black_box(input));
        })
    });

    let mut ring: CircularBuffer<u16> = CircularBuffer::with_capacity(1000);
    c.bench_function("bench_extend_chained", |b| {
        b.iter(|| {
            ring.clear();
            ring.extend(black_box((0..256).chain(768..1024)));
        })
    });
}

criterion_group!(benches, criterion_benchmarks);
criterion_main!(benches);
