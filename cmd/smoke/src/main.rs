//! pmring End-to-End Smoke Test
//!
//! Exercises the full submission layer:
//!   Part A — Queue: FIFO order, occupancy, empty-queue failures
//!   Part B — Task lifecycle: transitions and destroy rules
//!   Part C — Controller: per-kind queues, offset snapshots, teardown
//!
//! Run: ./target/release/smoke

use pmring::{IoKind, IoSubmit, RingConfig, RingController, RingError, TaskState};
use pmring_core::queue::FifoQueue;
use pmring_core::task::IoTask;

// ── Test harness ──

struct TestRunner {
    total: usize,
    passed: usize,
    failed: usize,
}

const LINE: &str = "────────────────────────────────────────────────────────────";

impl TestRunner {
    fn new() -> Self {
        Self { total: 0, passed: 0, failed: 0 }
    }

    fn section(&self, name: &str) {
        println!("\n{}", LINE);
        println!("  {}", name);
        println!("{}", LINE);
    }

    fn pass(&mut self, name: &str) {
        self.total += 1;
        self.passed += 1;
        println!("  [{:2}] {:<52} PASS", self.total, name);
    }

    fn fail(&mut self, name: &str, reason: &str) {
        self.total += 1;
        self.failed += 1;
        println!("  [{:2}] {:<52} FAIL: {}", self.total, name, reason);
    }

    fn check(&mut self, name: &str, ok: bool, reason: &str) {
        if ok { self.pass(name); } else { self.fail(name, reason); }
    }

    fn summary(&self) {
        println!("\n{}", LINE);
        println!(
            "  Total: {}  Passed: {}  Failed: {}",
            self.total, self.passed, self.failed
        );
        println!("{}", LINE);
    }
}

// ════════════════════════════════════════════════════════════
// Part A: Queue
// ════════════════════════════════════════════════════════════

fn test_queue(t: &mut TestRunner) {
    t.section("Part A: FIFO queue");

    let mut q = FifoQueue::new();
    for i in 0..10 {
        if q.push(i).is_err() {
            t.fail("push 10 integers", "allocation failed");
            return;
        }
    }
    t.pass("push 10 integers");
    t.check("occupancy after pushes", q.len() == 10, "len != 10");

    let mut in_order = true;
    for i in 0..10 {
        if q.pop().ok() != Some(i) {
            in_order = false;
        }
    }
    t.check("pop order equals push order", in_order, "order broken");
    t.check("final occupancy zero", q.is_empty(), "len != 0");

    t.check(
        "pop on empty fails Empty",
        q.pop() == Err(RingError::Empty),
        "wrong result",
    );
    t.check(
        "peek on empty fails Empty",
        q.peek() == Err(RingError::Empty),
        "wrong result",
    );
}

// ════════════════════════════════════════════════════════════
// Part B: Task lifecycle
// ════════════════════════════════════════════════════════════

fn test_task(t: &mut TestRunner) {
    t.section("Part B: Task lifecycle");

    let mut task = IoTask::new(IoKind::Write, 0, 128);
    t.check(
        "new task is READY",
        task.state() == TaskState::Ready,
        "wrong initial state",
    );

    t.check("begin from READY", task.begin().is_ok(), "begin refused");

    match task.destroy() {
        Err(returned) => {
            t.pass("destroy refused while ONGOING");
            task = returned;
        }
        Ok(()) => {
            t.fail("destroy refused while ONGOING", "destroy succeeded");
            return;
        }
    }

    t.check(
        "complete from ONGOING",
        task.complete(true).is_ok() && task.state() == TaskState::Success,
        "wrong terminal state",
    );
    t.check("destroy after SUCCESS", task.destroy().is_ok(), "refused");
}

// ════════════════════════════════════════════════════════════
// Part C: Controller
// ════════════════════════════════════════════════════════════

fn test_controller(t: &mut TestRunner) {
    t.section("Part C: Controller submission");

    let mut ctrl = match RingController::new(RingConfig::default().name("smoke")) {
        Ok(c) => { t.pass("controller init (capacity 4096)"); c }
        Err(e) => {
            t.fail("controller init (capacity 4096)", &format!("{}", e));
            return;
        }
    };

    let data = [0xA5u8; 128];
    t.check("submit write(128)", ctrl.submit_write(128, &data).is_ok(), "submit failed");
    t.check("submit read(64)", ctrl.submit_read(64).is_ok(), "submit failed");

    t.check(
        "queue depths wr=1 rd=1 fl=0",
        ctrl.write_pending() == 1 && ctrl.read_pending() == 1 && ctrl.flush_pending() == 0,
        "unexpected depths",
    );

    let wr = ctrl.take_next(IoKind::Write);
    let rd = ctrl.take_next(IoKind::Read);
    match (wr, rd) {
        (Ok(wr), Ok(rd)) => {
            t.check(
                "both tasks share the submission offset",
                wr.offset() == rd.offset(),
                "offsets differ",
            );
        }
        _ => t.fail("both tasks share the submission offset", "drain failed"),
    }

    ctrl.teardown();
    ctrl.teardown();
    t.pass("double teardown is a no-op");

    t.check(
        "submit after teardown fails Null",
        ctrl.submit_flush(8) == Err(RingError::Null),
        "wrong result",
    );
}

fn main() {
    println!("pmring smoke test");

    let mut t = TestRunner::new();
    test_queue(&mut t);
    test_task(&mut t);
    test_controller(&mut t);
    t.summary();

    if t.failed > 0 {
        std::process::exit(1);
    }
}
