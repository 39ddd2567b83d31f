//! End-to-end solver scenarios against the linked Yices library.
//!
//! Term names registered here are global to the native term table, so
//! every test uses its own prefix.

use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;
use yices::{
    terms, version, Config, Context, InterpolationContext, Parameters, Profiler, Status, Term,
    Version, YicesError,
};

fn int_var(name: &str) -> Term {
    terms::named_variable(name, terms::int_type().unwrap()).unwrap()
}

fn bool_var() -> Term {
    terms::new_uninterpreted_term(terms::bool_type().unwrap()).unwrap()
}

/// Contexts for the MCSat-based operations (interpolation, check with
/// model). `None` if the linked library was built without MCSat.
fn mcsat_context() -> Option<Context> {
    if !version::has_mcsat() {
        return None;
    }
    let mut config = Config::new().unwrap();
    config.set("solver-type", "mcsat").unwrap();
    config.set("mode", "push-pop").unwrap();
    Some(Context::with_config(&config).unwrap())
}

#[test]
fn test_empty_check_is_sat() {
    let mut ctx = Context::new().unwrap();
    assert_eq!(ctx.check().unwrap(), Status::Sat);
    assert_eq!(ctx.status().unwrap(), Status::Sat);
}

#[test]
fn test_model_orders_variables() {
    let x = int_var("mo_x");
    let y = int_var("mo_y");
    let gt = terms::parse("(> mo_x mo_y)").unwrap();

    let mut ctx = Context::new().unwrap();
    ctx.assert_formula(gt).unwrap();
    assert_eq!(ctx.check().unwrap(), Status::Sat);

    let model = ctx.get_model().unwrap();
    assert!(model.int_value(x).unwrap() > model.int_value(y).unwrap());
    assert!(model.formula_is_true(gt).unwrap());
    assert!(!format!("{}", model).is_empty());
}

#[test]
fn test_blocking_clause_enumerates_models() {
    let x = int_var("bk_x");
    let bounds = terms::parse("(and (> bk_x 2) (< bk_x 8) (/= bk_x 4))").unwrap();

    let mut ctx = Context::new().unwrap();
    ctx.assert_formula(bounds).unwrap();

    let mut found = Vec::new();
    while ctx.check().unwrap() == Status::Sat {
        let value = ctx.get_model().unwrap().int_value(x).unwrap();
        assert!([3, 5, 6, 7].contains(&value), "unexpected model {}", value);
        found.push(value);
        ctx.assert_blocking_clause().unwrap();
    }
    found.sort();
    assert_eq!(found, vec![3, 5, 6, 7]);
}

#[test]
fn test_negation_makes_unsat() {
    let f = {
        let _x = int_var("ng_x");
        terms::parse("(> ng_x 0)").unwrap()
    };

    let mut ctx = Context::new().unwrap();
    ctx.assert_formula(f).unwrap();
    ctx.assert_formula(terms::not(f).unwrap()).unwrap();
    assert_eq!(ctx.check().unwrap(), Status::Unsat);
}

#[test]
fn test_push_pop_scopes_assertions() {
    let _x = int_var("pp_x");
    let positive = terms::parse("(> pp_x 0)").unwrap();
    let negative = terms::parse("(< pp_x 0)").unwrap();

    let mut ctx = Context::new().unwrap();
    ctx.assert_formula(positive).unwrap();
    ctx.push().unwrap();
    ctx.assert_formula(negative).unwrap();
    assert_eq!(ctx.check().unwrap(), Status::Unsat);
    ctx.pop().unwrap();
    assert_eq!(ctx.check().unwrap(), Status::Sat);

    ctx.reset().unwrap();
    assert_eq!(ctx.status().unwrap(), Status::Idle);
}

#[test]
fn test_parameter_record() {
    let mut params = Parameters::new().unwrap();
    params.set("branching", "negative").unwrap();

    // the native layer validates names
    match params.set("no-such-parameter", "1") {
        Err(YicesError::Solver { .. }) => {}
        other => panic!("expected a solver error, got {:?}", other),
    }
    // rejected pairs are not recorded
    assert_eq!(format!("{}", params), "branching = negative\n");

    let mut ctx = Context::new().unwrap();
    params.defaults_for_context(&ctx).unwrap();

    let _x = int_var("pr_x");
    ctx.assert_formula(terms::parse("(> pr_x 41)").unwrap())
        .unwrap();
    assert_eq!(ctx.check_with_params(Some(&params)).unwrap(), Status::Sat);
}

/// Pigeonhole formula: `pigeons` pigeons into `holes` holes, each pigeon
/// placed somewhere, no two sharing a hole. Unsatisfiable for
/// `pigeons > holes`, and hard enough that the search runs for a long
/// time.
fn pigeonhole(ctx: &mut Context, pigeons: usize, holes: usize) {
    let grid: Vec<Vec<Term>> = (0..pigeons)
        .map(|_| (0..holes).map(|_| bool_var()).collect())
        .collect();
    for row in &grid {
        ctx.assert_formula(terms::or(row).unwrap()).unwrap();
    }
    for hole in 0..holes {
        for first in 0..pigeons {
            for second in first + 1..pigeons {
                let clause = terms::or(&[
                    terms::not(grid[first][hole]).unwrap(),
                    terms::not(grid[second][hole]).unwrap(),
                ])
                .unwrap();
                ctx.assert_formula(clause).unwrap();
            }
        }
    }
}

#[test]
fn test_timeout_interrupts_slow_search() {
    let mut ctx = Context::new().unwrap();
    pigeonhole(&mut ctx, 12, 11);

    let start = Instant::now();
    // rounded up to the one-second floor
    let status = ctx
        .check_with_timeout(None, Duration::from_millis(10))
        .unwrap();
    assert_eq!(status, Status::Interrupted);
    assert!(
        start.elapsed() < Duration::from_secs(60),
        "cancellation did not take effect"
    );
    assert_eq!(ctx.status().unwrap(), Status::Interrupted);
    drop(ctx);

    // the timer was disarmed on return: a later search is not stopped
    let mut fresh = Context::new().unwrap();
    assert_eq!(fresh.check().unwrap(), Status::Sat);
}

#[test]
fn test_version_metadata() {
    // oldest release the binding is expected to load against
    assert!(version::loaded() >= Version::new(2, 6, 1));
    assert!(!version::version_string().is_empty());
    assert!(!version::build_arch().is_empty());

    match version::require_at_least(Version::new(99, 9, 9)) {
        Err(YicesError::VersionMismatch {
            required, loaded, ..
        }) => {
            assert_eq!(required, Version::new(99, 9, 9));
            assert_eq!(loaded, version::loaded());
        }
        other => panic!("expected a version mismatch, got {:?}", other),
    }
}

#[test]
fn test_assumptions_and_unsat_core() {
    if version::loaded() < Version::new(2, 6, 4) {
        return;
    }

    let a = bool_var();
    let not_a = terms::not(a).unwrap();

    let mut ctx = Context::new().unwrap();
    let status = ctx.check_with_assumptions(None, &[a, not_a]).unwrap();
    assert_eq!(status, Status::Unsat);

    let core = ctx.get_unsat_core().unwrap();
    assert!(!core.is_empty());
    for literal in core {
        assert!(literal == a || literal == not_a);
    }
}

#[test]
fn test_interpolation_unsat_keeps_interpolant() {
    if version::loaded() < Version::new(2, 6, 4) {
        return;
    }
    let (mut ctx_a, mut ctx_b) = match (mcsat_context(), mcsat_context()) {
        (Some(a), Some(b)) => (a, b),
        _ => return,
    };

    let _x = int_var("ip_x");
    ctx_a
        .assert_formula(terms::parse("(> ip_x 0)").unwrap())
        .unwrap();
    ctx_b
        .assert_formula(terms::parse("(< ip_x 0)").unwrap())
        .unwrap();

    let mut combined = InterpolationContext::new(&mut ctx_a, &mut ctx_b).unwrap();
    assert_eq!(combined.interpolant(), None);

    assert_eq!(combined.check(None, false).unwrap(), Status::Unsat);
    let interpolant = combined.interpolant().expect("interpolant after unsat");
    // idempotent, unlike the model take
    assert_eq!(combined.interpolant(), Some(interpolant));
    // the model slot stays empty without build_model
    assert!(combined.take_model().is_none());
}

#[test]
fn test_interpolation_sat_model_taken_once() {
    if version::loaded() < Version::new(2, 6, 4) {
        return;
    }
    let (mut ctx_a, mut ctx_b) = match (mcsat_context(), mcsat_context()) {
        (Some(a), Some(b)) => (a, b),
        _ => return,
    };

    let y = int_var("is_y");
    ctx_a
        .assert_formula(terms::parse("(> is_y 0)").unwrap())
        .unwrap();
    ctx_b
        .assert_formula(terms::parse("(< is_y 10)").unwrap())
        .unwrap();

    let mut combined = InterpolationContext::new(&mut ctx_a, &mut ctx_b).unwrap();
    assert_eq!(combined.check(None, true).unwrap(), Status::Sat);

    let model = combined.take_model().expect("model after sat");
    let value = model.int_value(y).unwrap();
    assert!(value > 0 && value < 10);
    // ownership was transferred: the slot is empty now
    assert!(combined.take_model().is_none());
    assert_eq!(combined.interpolant(), None);
}

#[test]
fn test_check_with_model_fixes_values() {
    if version::loaded() < Version::new(2, 6, 4) {
        return;
    }
    let mut source = match mcsat_context() {
        Some(ctx) => ctx,
        None => return,
    };

    let z = int_var("cm_z");
    source
        .assert_formula(terms::parse("(> cm_z 0)").unwrap())
        .unwrap();
    assert_eq!(source.check().unwrap(), Status::Sat);
    let model = source.get_model().unwrap();

    // fixing z to its (positive) model value contradicts z < 0
    let mut target = mcsat_context().unwrap();
    target
        .assert_formula(terms::parse("(< cm_z 0)").unwrap())
        .unwrap();
    let status = target.check_with_model(None, &model, &[z]).unwrap();
    assert_eq!(status, Status::Unsat);

    let interpolant = target.get_model_interpolant().unwrap();
    assert!(!terms::to_string(interpolant).unwrap().is_empty());
}

#[test]
fn test_profiler_accounts_native_time() {
    Profiler::configure(true);
    let mut ctx = Context::new().unwrap();
    let _x = int_var("pf_x");
    ctx.assert_formula(terms::parse("(> pf_x 7)").unwrap())
        .unwrap();
    assert_eq!(ctx.check().unwrap(), Status::Sat);
    Profiler::configure(false);

    let report = Profiler::report();
    assert!(report.contains("yices_check_context"));
    assert!(report.contains("yices_assert_formula"));
}
