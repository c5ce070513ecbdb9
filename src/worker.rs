//! # Session Worker - Asynchronous Round Execution
//!
//! Presentation layers must stay responsive while the computer thinks, so
//! the [`GameSession`] can be handed to a dedicated worker thread and driven
//! through request/event channels. Requests are processed strictly in
//! order, which is what serializes human moves against in-flight computer
//! rounds: a move submitted mid-round simply waits in the queue and is
//! validated against the post-round board.
//!
//! While a round runs, an independent ticker thread emits elapsed-time
//! events for progress display. The ticker is cancelable on its own flag
//! and knows nothing about the search deadline.

use crate::board::{Board, Coord};
use crate::engine::RoundReport;
use crate::session::{GameSession, GameState};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// How often the progress ticker reports while a round is running.
const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Requests accepted by the worker.
#[derive(Debug)]
pub enum SessionRequest {
    /// Validate and apply a human move.
    HumanMove(Coord),
    /// Run one computer round.
    ComputerRound,
    /// Stop the worker thread and hand the session back.
    Shutdown,
}

/// Events emitted by the worker.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// A human move passed validation and was applied.
    MoveApplied { state: GameState },
    /// A human move was rejected; the board is unchanged.
    MoveRejected { coord: Coord, reason: String },
    /// A computer round began; input should be disabled until it completes.
    RoundStarted { board: Board },
    /// Elapsed wall-clock time since the running round started.
    Progress { elapsed: Duration },
    /// A computer round finished. `report` is `None` when the computer had
    /// no legal move and the round was a no-op.
    RoundCompleted {
        state: GameState,
        report: Option<RoundReport>,
    },
}

/// Handle held by the presentation side.
///
/// Events arrive on [`SessionHandle::events`]; requests go through the
/// submit methods. Dropping the handle without [`SessionHandle::shutdown`]
/// detaches the worker.
pub struct SessionHandle {
    requests: Sender<SessionRequest>,
    pub events: Receiver<SessionEvent>,
    searching: Arc<AtomicBool>,
    last_report: Arc<Mutex<Option<RoundReport>>>,
    join: Option<JoinHandle<GameSession>>,
}

impl SessionHandle {
    /// Queues a human move. Returns false if the worker is gone.
    pub fn submit_move(&self, coord: Coord) -> bool {
        self.requests.send(SessionRequest::HumanMove(coord)).is_ok()
    }

    /// Queues a computer round. Returns false if the worker is gone.
    pub fn request_round(&self) -> bool {
        self.requests.send(SessionRequest::ComputerRound).is_ok()
    }

    /// Whether a computer round is currently in flight.
    pub fn is_searching(&self) -> bool {
        self.searching.load(Ordering::Relaxed)
    }

    /// Diagnostics of the most recently completed round, if any.
    pub fn last_report(&self) -> Option<RoundReport> {
        self.last_report.lock().clone()
    }

    /// Stops the worker and returns the session it owned.
    pub fn shutdown(mut self) -> Option<GameSession> {
        let _ = self.requests.send(SessionRequest::Shutdown);
        self.join.take().and_then(|handle| handle.join().ok())
    }
}

/// Spawns the worker thread that owns `session`.
pub fn spawn(session: GameSession) -> SessionHandle {
    let (request_tx, request_rx) = mpsc::channel::<SessionRequest>();
    let (event_tx, event_rx) = mpsc::channel::<SessionEvent>();
    let searching = Arc::new(AtomicBool::new(false));
    let last_report = Arc::new(Mutex::new(None));

    let worker_searching = searching.clone();
    let worker_last_report = last_report.clone();
    let join = thread::spawn(move || {
        run(session, request_rx, event_tx, worker_searching, worker_last_report)
    });

    SessionHandle {
        requests: request_tx,
        events: event_rx,
        searching,
        last_report,
        join: Some(join),
    }
}

fn run(
    mut session: GameSession,
    requests: Receiver<SessionRequest>,
    events: Sender<SessionEvent>,
    searching: Arc<AtomicBool>,
    last_report: Arc<Mutex<Option<RoundReport>>>,
) -> GameSession {
    while let Ok(request) = requests.recv() {
        match request {
            SessionRequest::HumanMove(coord) => {
                let event = match session.apply_human_move(coord) {
                    Ok(state) => SessionEvent::MoveApplied { state: state.clone() },
                    Err(err) => SessionEvent::MoveRejected {
                        coord,
                        reason: err.to_string(),
                    },
                };
                let _ = events.send(event);
            }
            SessionRequest::ComputerRound => {
                searching.store(true, Ordering::Relaxed);
                let _ = events.send(SessionEvent::RoundStarted {
                    board: session.board().clone(),
                });
                let ticker = Ticker::start(events.clone());
                let report = session.run_computer_round();
                ticker.stop();
                *last_report.lock() = report.clone();
                searching.store(false, Ordering::Relaxed);
                let _ = events.send(SessionEvent::RoundCompleted {
                    state: session.state().clone(),
                    report,
                });
            }
            SessionRequest::Shutdown => break,
        }
    }
    session
}

/// Elapsed-time reporter running beside a computer round.
struct Ticker {
    cancel: Arc<AtomicBool>,
    join: JoinHandle<()>,
}

impl Ticker {
    fn start(events: Sender<SessionEvent>) -> Ticker {
        let cancel = Arc::new(AtomicBool::new(false));
        let flag = cancel.clone();
        let join = thread::spawn(move || {
            let started = Instant::now();
            while !flag.load(Ordering::Relaxed) {
                let _ = events.send(SessionEvent::Progress {
                    elapsed: started.elapsed(),
                });
                thread::sleep(TICK_INTERVAL);
            }
            // One final tick so consumers see the full elapsed time.
            let _ = events.send(SessionEvent::Progress {
                elapsed: started.elapsed(),
            });
        });
        Ticker { cancel, join }
    }

    fn stop(self) {
        self.cancel.store(true, Ordering::Relaxed);
        let _ = self.join.join();
    }
}
