#[macro_use]
extern crate bencher;

use bencher::Bencher;

use qarith::prelude::*;

fn bench_qft_larger(b: &mut Bencher) {
    let n = 10;
    let register = (1..=n).collect::<Vec<_>>();
    let base = QuantumState::<f64>::from_basis(n, 37).unwrap();

    b.iter(|| {
        let mut state = base.clone();
        qft(&mut state, &register, false).unwrap();
        state
    });
}

fn bench_cadd(b: &mut Bencher) {
    let register = [2, 3, 4, 5, 6, 7];
    let base = QuantumState::<f64>::from_registers(7, &[(&[1], 1), (&register, 21)]).unwrap();

    b.iter(|| {
        let mut state = base.clone();
        cadd(&mut state, 1, &register, 13).unwrap();
        state
    });
}

fn bench_add_mod(b: &mut Bencher) {
    let register = [2, 3, 4, 5];
    let ancillas = [6, 7, 8];
    let base = QuantumState::<f64>::from_registers(8, &[(&[1], 1), (&register, 9)]).unwrap();

    b.iter(|| {
        let mut state = base.clone();
        cadd_mod_n(&mut state, 1, &register, ancillas.into(), 7, 13).unwrap();
        state
    });
}

fn bench_mult_mod(b: &mut Bencher) {
    let (reg1, reg2) = ([2, 3, 4], [5, 6, 7]);
    let ancillas = [8, 9, 10, 11];
    let base = QuantumState::<f64>::from_registers(11, &[(&[1], 1), (&reg1, 3)]).unwrap();

    b.iter(|| {
        let mut state = base.clone();
        cmult_mod_n(&mut state, 1, &reg1, &reg2, ancillas.into(), 2, 7).unwrap();
        state
    });
}

fn bench_expo_mod_base(b: &mut Bencher) {
    let (reg1, reg2) = ([2, 3, 4], [5, 6, 7]);
    let ancillas = [8, 9, 10, 11];
    let base = QuantumState::<f64>::from_registers(11, &[(&[1], 1), (&reg1, 1)]).unwrap();

    b.iter(|| {
        let mut state = base.clone();
        cexpo_mod_n(
            &mut state,
            1,
            &reg1,
            &reg2,
            ancillas.into(),
            3,
            6,
            7,
            ExponentiationStrategy::SquareAndMultiply,
        )
        .unwrap();
        state
    });
}

benchmark_group!(
    benches,
    bench_qft_larger,
    bench_cadd,
    bench_add_mod,
    bench_mult_mod,
    bench_expo_mod_base
);
benchmark_main!(benches);
