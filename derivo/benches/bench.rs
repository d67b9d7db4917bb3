use criterion::{criterion_group, criterion_main, Criterion};
use derivo::tree::{self, Config, Rule, RuleTree};
use derivo::{kernel, Context, Term, TypeSystem};

/// Church numeral `n`, i.e. `λf. λx. f (f (... x))`.
fn church(n: usize) -> String {
    let body = (0..n).fold("x".to_string(), |acc, _| format!("f ({})", acc));
    format!(r"\f. \x. {}", body)
}

/// Chain of let-bound functions, each applying the previous one twice.
fn twice_chain(n: usize) -> String {
    let mut tm = r"let f0 = \x. x in ".to_string();
    for i in 1..n {
        tm += &format!(r"let f{} = \x. f{} (f{} x) in ", i, i - 1, i - 1);
    }
    tm + &format!("f{} true", n - 1)
}

/// Derivation of `λx0: Bool. ... λx{n-1}: Bool. true : Bool → ... → Bool`.
fn abs_tree(n: usize) -> RuleTree {
    let context = |k: usize| (0..k).map(|i| format!("x{}: Bool", i)).collect::<Vec<_>>();
    let mut tree = RuleTree {
        context: context(n).join(", "),
        term: "true".into(),
        ty: "Bool".into(),
        rule: Rule::True,
        children: Vec::new(),
    };
    for k in (0..n).rev() {
        tree = RuleTree {
            context: context(k).join(", "),
            term: format!(r"\x{}: Bool. {}", k, tree.term),
            ty: format!("Bool -> {}", tree.ty),
            rule: Rule::Abs,
            children: vec![tree],
        };
    }
    tree
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let ctx = Context::new();
    let numeral = church(200);
    let chain = Term::parse(&twice_chain(50), &ctx).unwrap();
    let tree = abs_tree(40);

    c.bench_function("parse", |b| b.iter(|| Term::parse(&numeral, &ctx).unwrap()));
    c.bench_function("infer", |b| b.iter(|| kernel::type_of(&ctx, &chain).unwrap()));

    let seq = Config {
        system: TypeSystem::SimplyTyped,
        parallel: false,
    };
    let par = Config {
        parallel: true,
        ..seq
    };
    c.bench_function("tree", |b| b.iter(|| assert!(tree::check(&tree, &seq).is_valid())));
    c.bench_function("tree-par", |b| b.iter(|| assert!(tree::check(&tree, &par).is_valid())));
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(20);
    targets = criterion_benchmark
}
criterion_main!(benches);
