use criterion::{black_box, criterion_group, criterion_main, Criterion};
use evalexpr::{build_operator_tree, ContextWithMutableVariables, HashMapContext, Value};
use stackcalc::{eval_tokens, tokenize, Environment, Session};

const BENCH_EXPRESSION_FLAT: &str = "2 * 6 - 4 - 3 / 2 + 3 * 4 * x - 32 * y + 43 * z";
const BENCH_EXPRESSION_NESTED: &str = "x - 1 / (y * 5) + (5 - 2 / (0.5 * z)) * (x + (y - z))";
const BENCH_X_RANGE: (usize, usize) = (0, 100);
const BENCH_Y: f64 = 3.0;
const BENCH_Z: f64 = 4.0;

fn stackcalc_tokens(c: &mut Criterion) {
    for (name, text) in [
        ("flat", BENCH_EXPRESSION_FLAT),
        ("nested", BENCH_EXPRESSION_NESTED),
    ] {
        let tokens = tokenize::<f64>(text);
        let mut global = Environment::new();
        global.insert("y", BENCH_Y);
        global.insert("z", BENCH_Z);
        c.bench_function(&format!("stackcalc_{name}"), |b| {
            b.iter(|| {
                for i in BENCH_X_RANGE.0..BENCH_X_RANGE.1 {
                    let mut local = Environment::new();
                    local.insert("x", black_box(i as f64));
                    eval_tokens(&tokens, &local, &global).unwrap();
                }
            })
        });
    }
}

fn stackcalc_call(c: &mut Criterion) {
    let mut session = Session::<f64>::new();
    session
        .exec_line(&format!("def f(x, y, z) = {BENCH_EXPRESSION_FLAT}"))
        .unwrap();
    let args = ["x", "3", "4"];
    c.bench_function("stackcalc_call", |b| {
        b.iter(|| {
            for i in BENCH_X_RANGE.0..BENCH_X_RANGE.1 {
                let mut s = session.clone();
                s.exec_line(&format!("x = {i}")).unwrap();
                s.call("f", black_box(&args[..])).unwrap();
            }
        })
    });
}

fn stackcalc_parse(c: &mut Criterion) {
    c.bench_function("stackcalc_parse", |b| {
        b.iter(|| {
            let mut session = Session::<f64>::new();
            session.exec_line(black_box("x = 1")).unwrap();
            session.exec_line(black_box("def g(a) = a * (x + 2) - 1")).unwrap();
            session.exec_line(black_box("g(x)")).unwrap();
        })
    });
}

fn evalexpr_flat(c: &mut Criterion) {
    let tree = build_operator_tree(BENCH_EXPRESSION_FLAT).unwrap();
    let mut context = HashMapContext::new();
    context.set_value("y".into(), Value::Float(BENCH_Y)).unwrap();
    context.set_value("z".into(), Value::Float(BENCH_Z)).unwrap();
    c.bench_function("evalexpr_flat", |b| {
        b.iter(|| {
            for i in BENCH_X_RANGE.0..BENCH_X_RANGE.1 {
                context
                    .set_value("x".into(), Value::Float(black_box(i as f64)))
                    .unwrap();
                tree.eval_with_context(&context).unwrap();
            }
        })
    });
}

criterion_group!(
    benches,
    stackcalc_tokens,
    stackcalc_call,
    stackcalc_parse,
    evalexpr_flat
);
criterion_main!(benches);
