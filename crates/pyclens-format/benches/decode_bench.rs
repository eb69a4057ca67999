//! Decoding benchmarks over synthetic containers

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pyclens_format::PycFile;

fn push_u32(bytes: &mut Vec<u8>, value: u32) {
    bytes.extend_from_slice(&value.to_le_bytes());
}

/// A 2.7 container: one code record with `constant_count` interned constants
/// and a matching run of back-references.
fn build_container(constant_count: u32) -> Vec<u8> {
    let mut bytes = 62211u16.to_le_bytes().to_vec();
    bytes.extend_from_slice(b"\r\n");
    push_u32(&mut bytes, 0); // mtime

    bytes.push(b'c');
    push_u32(&mut bytes, 0); // argument count
    push_u32(&mut bytes, 0); // local count
    push_u32(&mut bytes, 4); // stack size
    push_u32(&mut bytes, 64); // flags

    // Alternating operand / no-operand opcodes
    let mut code = Vec::new();
    for i in 0..64u8 {
        if i % 2 == 0 {
            code.extend_from_slice(&[100, i, 0]);
        } else {
            code.push(1);
        }
    }
    bytes.push(b's');
    push_u32(&mut bytes, code.len() as u32);
    bytes.extend_from_slice(&code);

    // constants: N interned strings followed by N refs back at them
    bytes.push(b'(');
    push_u32(&mut bytes, constant_count * 2);
    for i in 0..constant_count {
        let text = format!("const_{i}");
        bytes.push(b't');
        push_u32(&mut bytes, text.len() as u32);
        bytes.extend_from_slice(text.as_bytes());
    }
    for i in 0..constant_count {
        bytes.push(b'R');
        push_u32(&mut bytes, i);
    }

    for _ in 0..4 {
        bytes.push(b'(');
        push_u32(&mut bytes, 0); // names, varnames, freevars, cellvars
    }
    bytes.push(b's');
    push_u32(&mut bytes, 7);
    bytes.extend_from_slice(b"spam.py"); // filename
    bytes.push(b't');
    push_u32(&mut bytes, 8);
    bytes.extend_from_slice(b"<module>"); // name
    push_u32(&mut bytes, 1); // first line number
    bytes.push(b's');
    push_u32(&mut bytes, 0); // line number table

    bytes
}

fn bench_decode(c: &mut Criterion) {
    let small = build_container(8);
    let large = build_container(512);

    c.bench_function("decode_small_container", |b| {
        b.iter(|| PycFile::decode(black_box(&small)).unwrap())
    });
    c.bench_function("decode_large_container", |b| {
        b.iter(|| PycFile::decode(black_box(&large)).unwrap())
    });
}

criterion_group!(benches, bench_decode);
criterion_main!(benches);
