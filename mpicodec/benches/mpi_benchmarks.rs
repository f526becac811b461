//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Benchmarks for the MPI framer and session layer

use bytes::BytesMut;
use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use mudlink_mpicodec::{MpiCodec, MudSession};
use tokio_util::codec::Decoder;

fn drain(codec: &mut MpiCodec, mut src: BytesMut) {
    while let Some(event) = codec.decode(&mut src).unwrap() {
        black_box(event);
    }
}

fn bench_scan_plain_text(c: &mut Criterion) {
    // Text with marker-ish bytes sprinkled in, the common case for a
    // stream full of tildes and dollar signs but no real messages.
    let mut payload = Vec::with_capacity(4096);
    while payload.len() < 4096 {
        payload.extend_from_slice(b"gold: 100$ ~worn sign #3 Exits: east.\r\n");
    }
    let mut group = c.benchmark_group("mpi_scan_text");
    group.throughput(Throughput::Bytes(payload.len() as u64));
    group.bench_function("4k_text", |b| {
        let mut codec = MpiCodec::new();
        b.iter(|| drain(&mut codec, BytesMut::from(&payload[..])));
    });
    group.finish();
}

fn bench_extract_messages(c: &mut Criterion) {
    let mut payload = Vec::with_capacity(4096);
    let body = vec![b'x'; 200];
    while payload.len() < 4096 {
        payload.extend_from_slice(b"~$#EV200\n");
        payload.extend_from_slice(&body);
    }
    let mut group = c.benchmark_group("mpi_extract");
    group.throughput(Throughput::Bytes(payload.len() as u64));
    group.bench_function("4k_messages", |b| {
        let mut codec = MpiCodec::new();
        b.iter(|| drain(&mut codec, BytesMut::from(&payload[..])));
    });
    group.finish();
}

fn bench_full_session(c: &mut Criterion) {
    let mut payload = Vec::with_capacity(4096);
    while payload.len() < 4096 {
        payload.extend_from_slice(b"A dusty road stretches east.\r\n");
        payload.extend_from_slice(&[0xFF, 0xF9]); // IAC GA prompt marker
        payload.extend_from_slice(b"~$#EV6\nnotice");
    }
    let mut group = c.benchmark_group("session_feed");
    group.throughput(Throughput::Bytes(payload.len() as u64));
    group.bench_function("4k_mixed", |b| {
        let mut session = MudSession::new();
        b.iter(|| {
            black_box(session.feed(black_box(&payload)).unwrap());
            session.take_outbound();
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_scan_plain_text,
    bench_extract_messages,
    bench_full_session
);
criterion_main!(benches);
