use divan::AllocProfiler;

#[global_allocator]
static ALLOC: AllocProfiler = AllocProfiler::system();

fn main() {
    divan::main();
}

pub mod alpha {
    use divan::Bencher;
    use wex_chunk::bitstream::{decode_alpha_rle, unpack_nibbles, PACKED_ALPHA_LEN};
    use wex_chunk::ByteCursor;

    fn rle_input() -> Vec<u8> {
        let mut stream = Vec::new();
        for run in 0..32u8 {
            stream.extend([0x80 | 64, run]);
            stream.push(64);
            stream.extend(0..64u8);
        }
        stream
    }

    #[divan::bench]
    fn rle(bencher: Bencher) {
        bencher.with_inputs(rle_input).bench_refs(|data| {
            divan::black_box(decode_alpha_rle(&mut ByteCursor::new(data)).unwrap());
        });
    }

    #[divan::bench]
    fn nibbles(bencher: Bencher) {
        bencher
            .with_inputs(|| vec![0x3Au8; PACKED_ALPHA_LEN])
            .bench_refs(|data| {
                divan::black_box(unpack_nibbles(data));
            });
    }
}

pub mod mask {
    use divan::Bencher;
    use wex_chunk::bitstream::mask_indices;

    #[divan::bench(args = [64, 4096, 65536])]
    fn indices(bencher: Bencher, count: usize) {
        let mask = vec![0xA5u8; count.div_ceil(8)];
        bencher.bench_local(|| divan::black_box(mask_indices(&mask, count).count()));
    }
}
