//! End-to-end scenarios for asynchronous chains.

mod common;

use common::{done, family, family_run, retry};
use rensa::{
    Chain, Continuation, Fault, FaultKind, FaultKinds, Flow, Handler, MemorySink, Next, Outcome,
    SharedSink, Step, StepHandler, invoke_blocking,
    handlers::{FILTERED_MARKER, FilterHandler, LabelStep},
    testing::{FaultingStep, FlakyStep, yield_now},
};
use std::sync::Arc;

fn evil_step(sink: &SharedSink) -> FaultingStep {
    FaultingStep::new("EvilStep", FaultKind::InvalidOperation, Arc::clone(sink))
        .with_message("Boomer!")
        .suspending()
}

fn always_fails(sink: &SharedSink) -> FaultingStep {
    FaultingStep::new("AlwaysFails", FaultKind::InvalidOperation, Arc::clone(sink))
        .with_message("Always fails")
        .suspending()
}

// ============================================================================
// Reference Scenarios
// ============================================================================

#[tokio::test]
async fn test_family_chain_then_done() {
    let sink = MemorySink::new();
    let log = sink.shared();
    let chain = family(Chain::builder(), &log).build(done(&log));

    chain.invoke().await.unwrap();

    assert_eq!(sink.contents(), "Son\nWife\nHusband\ndone\n");
}

#[tokio::test]
async fn test_filter_suppresses_evil_step() {
    let sink = MemorySink::new();
    let log = sink.shared();
    let chain = family(
        Chain::builder().handler(FilterHandler::invalid_operation("Filter", log.clone())),
        &log,
    )
    .step(evil_step(&log))
    .finish();

    chain.invoke().await.unwrap();

    assert_eq!(
        sink.contents(),
        "Filter\nSon\nWife\nHusband\nEvilStep\nFiltered!\n"
    );
}

#[tokio::test]
async fn test_retry_rethrows_after_three_attempts() {
    let sink = MemorySink::new();
    let log = sink.shared();
    let chain = family(Chain::builder().handler(retry(3, &log)), &log)
        .step(always_fails(&log))
        .finish();

    let err = chain.invoke().await.unwrap_err();

    assert_eq!(err, Fault::invalid_operation("Always fails"));
    let expected = format!("Retry\n{}", family_run("AlwaysFails").repeat(3));
    assert_eq!(sink.contents(), expected);
}

#[tokio::test]
async fn test_retry_succeeds_on_second_attempt() {
    let sink = MemorySink::new();
    let log = sink.shared();
    let fails_once = FlakyStep::new("FailsTwice", 1, log.clone()).suspending();
    let chain = family(
        Chain::builder()
            .step(fails_once.scope())
            .handler(retry(3, &log)),
        &log,
    )
    .step(fails_once)
    .finish();

    chain.invoke().await.unwrap();
    let first = sink.contents();
    sink.clear();
    chain.invoke().await.unwrap();

    let expected = format!("Retry\n{}", family_run("FailsTwice").repeat(2));
    assert_eq!(first, expected);
    assert_eq!(sink.contents(), expected);
}

// ============================================================================
// Filter Properties
// ============================================================================

#[tokio::test]
async fn test_filter_transparent_without_fault() {
    let sink = MemorySink::new();
    let log = sink.shared();
    let chain = family(
        Chain::builder().handler(FilterHandler::invalid_operation("Filter", log.clone())),
        &log,
    )
    .build(done(&log));

    chain.invoke().await.unwrap();

    assert_eq!(sink.lines(), ["Filter", "Son", "Wife", "Husband", "done"]);
    assert!(!sink.lines().iter().any(|line| line == FILTERED_MARKER));
}

#[tokio::test]
async fn test_filter_propagates_unrelated_fault() {
    let sink = MemorySink::new();
    let log = sink.shared();
    let chain = family(
        Chain::builder().handler(FilterHandler::invalid_operation("Filter", log.clone())),
        &log,
    )
    .step(
        FaultingStep::new("Broken", FaultKind::Application, log.clone()).with_message("disk full"),
    )
    .build(done(&log));

    let err = chain.invoke().await.unwrap_err();

    assert_eq!(err, Fault::application("disk full"));
    assert_eq!(sink.contents(), "Filter\nSon\nWife\nHusband\nBroken\n");
}

#[tokio::test]
async fn test_unfiltered_fault_reaches_caller_unchanged() {
    let sink = MemorySink::new();
    let log = sink.shared();
    let chain = family(Chain::builder(), &log)
        .step(evil_step(&log))
        .build(done(&log));

    let err = chain.invoke().await.unwrap_err();

    assert!(err.is(FaultKind::InvalidOperation));
    assert_eq!(err.message(), "Boomer!");
    assert_eq!(sink.contents(), "Son\nWife\nHusband\nEvilStep\n");
}

// ============================================================================
// Composition
// ============================================================================

#[tokio::test]
async fn test_filter_above_exhausted_retry() {
    let sink = MemorySink::new();
    let log = sink.shared();
    let chain = Chain::builder()
        .handler(FilterHandler::invalid_operation("Filter", log.clone()))
        .handler(retry(2, &log))
        .step(always_fails(&log))
        .finish();

    chain.invoke().await.unwrap();

    assert_eq!(
        sink.contents(),
        "Filter\nRetry\nAlwaysFails\nAlwaysFails\nFiltered!\n"
    );
}

#[tokio::test]
async fn test_filter_below_retry_settles_first_attempt() {
    let sink = MemorySink::new();
    let log = sink.shared();
    let chain = Chain::builder()
        .handler(retry(3, &log))
        .handler(FilterHandler::invalid_operation("Filter", log.clone()))
        .step(evil_step(&log))
        .build(done(&log));

    chain.invoke().await.unwrap();

    assert_eq!(sink.contents(), "Retry\nFilter\nEvilStep\nFiltered!\n");
}

#[tokio::test]
async fn test_retry_counter_is_per_invocation() {
    let sink = MemorySink::new();
    let log = sink.shared();
    let chain = Chain::builder()
        .handler(retry(3, &log))
        .step(always_fails(&log))
        .finish();

    chain.invoke().await.unwrap_err();
    assert_eq!(sink.len(), 4);

    sink.clear();
    chain.invoke().await.unwrap_err();
    assert_eq!(sink.len(), 4);
}

#[tokio::test]
async fn test_filter_with_kind_set() {
    let sink = MemorySink::new();
    let log = sink.shared();
    let filter = FilterHandler::builder(log.clone())
        .kinds(FaultKinds::APPLICATION | FaultKinds::INVALID_OPERATION)
        .marker("Swallowed")
        .build()
        .unwrap();
    let chain = Chain::builder()
        .handler(filter)
        .step(FaultingStep::new("Broken", FaultKind::Application, log.clone()))
        .finish();

    chain.invoke().await.unwrap();

    assert_eq!(sink.lines(), ["Filter", "Broken", "Swallowed"]);
}

/// Stops the chain without calling the rest.
struct Halt;

impl Step for Halt {
    async fn enter(&self) -> Result<Flow, Fault> {
        yield_now().await;
        Ok(Flow::Stop)
    }
}

#[tokio::test]
async fn test_stop_completes_without_terminal() {
    let sink = MemorySink::new();
    let log = sink.shared();
    let chain = Chain::builder()
        .handler(FilterHandler::invalid_operation("Filter", log.clone()))
        .step(LabelStep::new("Son", log.clone()))
        .step(Halt)
        .step(evil_step(&log))
        .build(done(&log));

    chain.invoke().await.unwrap();

    assert_eq!(sink.contents(), "Filter\nSon\n");
}

#[tokio::test]
async fn test_chain_is_entry_point_continuation() {
    let sink = MemorySink::new();
    let log = sink.shared();
    let chain = family(Chain::builder(), &log).build(done(&log));

    Continuation::proceed(&chain).await.unwrap();
    chain.invoke_from(2).await.unwrap();

    assert_eq!(sink.contents(), "Son\nWife\nHusband\ndone\nHusband\ndone\n");
}

#[tokio::test]
async fn test_invoke_from_terminal_position() {
    let sink = MemorySink::new();
    let log = sink.shared();
    let chain = family(Chain::builder(), &log).build(done(&log));

    chain.invoke_from(3).await.unwrap();
    assert_eq!(sink.contents(), "done\n");

    sink.clear();
    chain.invoke_from(4).await.unwrap();
    assert_eq!(sink.contents(), "");
}

#[tokio::test]
async fn test_manual_composition_with_step_handlers() {
    let sink = MemorySink::new();
    let log = sink.shared();
    let son = StepHandler::new(LabelStep::new("Son", log.clone()));
    let wife = StepHandler::new(LabelStep::new("Wife", log.clone()));
    let husband = StepHandler::new(LabelStep::new("Husband", log.clone()));
    let done = done(&log);

    let (husband, done) = (&husband, &done);
    let after_wife = move || husband.handle(Next::new(done));
    let after_son = {
        let (wife, after_wife) = (&wife, &after_wife);
        move || wife.handle(Next::new(after_wife))
    };

    son.handle(Next::new(&after_son)).await.unwrap();

    assert_eq!(sink.contents(), "Son\nWife\nHusband\ndone\n");
}

#[tokio::test]
async fn test_closure_terminal_may_suspend() {
    let sink = MemorySink::new();
    let log = sink.shared();
    let terminal = {
        let log = log.clone();
        move || {
            let log = log.clone();
            async move {
                yield_now().await;
                log.emit("done");
                Outcome::Ok(())
            }
        }
    };
    let chain = family(Chain::builder(), &log).build(terminal);

    chain.invoke().await.unwrap();

    assert_eq!(sink.contents(), "Son\nWife\nHusband\ndone\n");
}

#[test]
fn test_invoke_blocking_runs_filter_scenario() {
    let sink = MemorySink::new();
    let log = sink.shared();
    let chain = family(
        Chain::builder().handler(FilterHandler::invalid_operation("Filter", log.clone())),
        &log,
    )
    .step(evil_step(&log))
    .finish();

    invoke_blocking(&chain).unwrap();

    assert_eq!(
        sink.contents(),
        "Filter\nSon\nWife\nHusband\nEvilStep\nFiltered!\n"
    );
}

// ============================================================================
// Timeouts
// ============================================================================

mod timeouts {
    use super::*;
    use rensa::handlers::{RetryHandler, RetryPolicy, TimeoutHandler};
    use std::time::Duration;

    /// Writes its label, then never settles in time.
    struct Sleepy(SharedSink);

    impl Step for Sleepy {
        async fn enter(&self) -> Result<Flow, Fault> {
            self.0.emit("Sleepy");
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(Flow::Next)
        }
    }

    #[tokio::test]
    async fn test_retry_on_timeout_then_rethrow() {
        let sink = MemorySink::new();
        let log = sink.shared();
        let policy = RetryPolicy::new(2, FaultKinds::TIMEOUT).unwrap();
        let chain = Chain::builder()
            .handler(RetryHandler::new("Retry", policy, log.clone()))
            .handler(TimeoutHandler::millis(10))
            .step(Sleepy(log.clone()))
            .build(done(&log));

        let err = chain.invoke().await.unwrap_err();

        assert!(err.is(FaultKind::Timeout));
        assert_eq!(sink.contents(), "Retry\nSleepy\nSleepy\n");
    }

    #[tokio::test]
    async fn test_timeout_transparent_for_fast_chain() {
        let sink = MemorySink::new();
        let log = sink.shared();
        let chain = family(Chain::builder().handler(TimeoutHandler::secs(5)), &log)
            .build(done(&log));

        chain.invoke().await.unwrap();

        assert_eq!(sink.contents(), "Son\nWife\nHusband\ndone\n");
    }
}
