//! Benchmarks for VFS lookups on the seeded tree.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use mirage_vfs::{Vfs, seed_vfs};

fn bench_lookups(c: &mut Criterion) {
    let vfs = seed_vfs();

    c.bench_function("list_home", |b| {
        b.iter(|| vfs.list(black_box("/home/user")));
    });

    c.bench_function("read_readme", |b| {
        b.iter(|| vfs.read(black_box("/home/user/readme.txt")));
    });

    c.bench_function("stat_deep_entry", |b| {
        b.iter(|| vfs.stat(black_box("/var/log/syslog")));
    });

    c.bench_function("is_dir_miss", |b| {
        b.iter(|| vfs.is_dir(black_box("/no/such/path")));
    });
}

criterion_group!(benches, bench_lookups);
criterion_main!(benches);
