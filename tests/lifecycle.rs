//! Lifecycle and leak accounting for context wrappers.
//!
//! Runs against the linked Yices library. Everything lives in a single
//! test function: the census is process-wide, and concurrently running
//! tests would perturb the counts.

use yices::{Context, Mode, YicesError};

#[test]
fn test_context_lifecycle_and_census() {
    let baseline = Context::census();

    // matched construct/release pairs return to the baseline
    let mut contexts = Vec::new();
    for _ in 0..8 {
        contexts.push(Context::new().unwrap());
    }
    assert_eq!(Context::census(), baseline + 8);
    drop(contexts);
    assert_eq!(Context::census(), baseline);

    // closing twice is a no-op both times
    let mut ctx = Context::new().unwrap();
    assert_eq!(Context::census(), baseline + 1);
    ctx.close();
    assert_eq!(Context::census(), baseline);
    ctx.close();
    assert_eq!(Context::census(), baseline);

    // operations on a closed context fail fast instead of touching the
    // native layer with a dead handle
    assert!(matches!(ctx.push(), Err(YicesError::Closed("context"))));
    assert!(matches!(ctx.check(), Err(YicesError::Closed("context"))));
    assert!(matches!(ctx.get_model(), Err(YicesError::Closed("context"))));
    // cancellation stays advisory in every state
    ctx.stop_search();

    // failed construction from a bad logic name must not leak the
    // temporary configuration or a half-built context
    for _ in 0..64 {
        assert!(Context::for_logic("NOT_A_LOGIC").is_err());
        assert!(Context::for_logic_with_mode("NOT_A_LOGIC", Mode::PushPop).is_err());
    }
    assert_eq!(Context::census(), baseline);

    // a one-shot context exists but rejects the assertion stack
    let mut one_shot = Context::for_logic_with_mode("QF_LIA", Mode::OneShot).unwrap();
    assert!(matches!(one_shot.push(), Err(YicesError::Solver { .. })));
    drop(one_shot);
    assert_eq!(Context::census(), baseline);
}
