//! Turn coordination between the two participants.
//!
//! Each participant runs in its own task and sleeps on a grant channel until
//! the coordinator hands it the turn token. The coordinator is the only
//! writer of [`GameState`], which it publishes on a watch channel; it
//! evaluates win and stalemate after every reported turn.
//!
//! ```text
//! coordinator ──TurnGrant──▶ participant task ──take_turn──▶ Board / TilePool
//!      ▲                            │
//!      └──────── TurnReport ◀───────┘
//! ```

use super::agent::{DecisionSource, ParticipantAgent};
use super::board::Board;
use super::deal::{Deal, Seeds};
use super::error::{GameError, GameErrorKind};
use super::events::{DisplaySink, GameEvent};
use super::invariants::{DominoInvariants, InvariantSet};
use super::pool::TilePool;
use super::snapshot::{GameSnapshot, TurnRecord};
use super::{End, GameState, Outcome, SEATS, Seat, Tile, TurnOutcome};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

/// Permission to take exactly one turn.
#[derive(Debug)]
struct TurnGrant {
    turn: usize,
    reply: oneshot::Sender<Result<TurnReport, GameError>>,
}

/// What a participant sends back after its turn.
#[derive(Debug, Clone)]
struct TurnReport {
    outcome: TurnOutcome,
    hand: Vec<Tile>,
}

/// Final record of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct GameReport {
    /// How the game ended.
    outcome: Outcome,
    /// Participant names indexed by seat.
    names: [String; 2],
    /// Seeds that produced the deal, if it was shuffled.
    seeds: Option<Seeds>,
    /// Seat that held the token first.
    first: Seat,
    /// Every turn in order.
    turns: Vec<TurnRecord>,
    /// Final board, head first.
    board: Vec<Tile>,
    /// Final hands indexed by seat.
    hands: [Vec<Tile>; 2],
    /// Tiles left in the pool.
    pool_remaining: usize,
}

impl GameReport {
    /// Returns the winner's name, if there is one.
    pub fn winner_name(&self) -> Option<&str> {
        self.outcome
            .winner()
            .map(|seat| self.names[seat.index()].as_str())
    }
}

/// Owns the alternation state machine and the turn token.
pub struct TurnCoordinator {
    deal: Deal,
    sources: [Box<dyn DecisionSource>; 2],
    sink: Option<Box<dyn DisplaySink>>,
}

impl TurnCoordinator {
    /// Creates a coordinator for a deal and one decision source per seat.
    pub fn new(
        deal: Deal,
        seat_one: Box<dyn DecisionSource>,
        seat_two: Box<dyn DecisionSource>,
    ) -> Self {
        Self {
            deal,
            sources: [seat_one, seat_two],
            sink: None,
        }
    }

    /// Attaches a display sink that sees every game event.
    pub fn with_sink(mut self, sink: impl DisplaySink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Plays the game to completion.
    ///
    /// Spawns one task per participant, passes the token back and forth until
    /// a hand empties or both seats report no move in succession, then
    /// releases and joins both tasks before returning.
    #[instrument(skip(self))]
    pub async fn run(self) -> Result<GameReport, GameError> {
        let Self {
            deal,
            sources,
            sink,
        } = self;

        let initial = deal.all_tiles();
        let (pool_tiles, hands, board_tiles, first, seeds) = deal.into_parts();

        let mut pool = TilePool::new();
        pool.initialize(pool_tiles);
        let board = Board::new();
        for tile in board_tiles {
            board.add_piece(tile, End::Tail)?;
        }

        let mut table = Table::new(Arc::new(board), Arc::new(pool), initial, sink);
        table.seat(sources, hands);
        let names = table.names.clone();

        info!(%first, one = %names[0], two = %names[1], "Game starting");
        table.emit(GameEvent::GameStarted {
            names: names.clone(),
            first,
            board: table.board.tiles(),
            pool_size: table.pool.len(),
        });

        let played = table.play(first).await;
        let agents = table.release().await;

        let outcome = played?;
        let agents = agents?;
        let hands = agents.map(|agent| agent.hand().tiles().to_vec());

        info!(%outcome, turns = table.turns.len(), "Game over");
        table.emit(GameEvent::GameOver {
            outcome,
            names: names.clone(),
            board: table.board.tiles(),
            hands: hands.clone(),
        });

        Ok(GameReport {
            outcome,
            names,
            seeds,
            first,
            turns: table.turns,
            board: table.board.tiles(),
            hands,
            pool_remaining: table.pool.len(),
        })
    }
}

/// Runtime state of a game in progress, owned by the coordinator.
struct Table {
    board: Arc<Board>,
    pool: Arc<TilePool>,
    state: watch::Sender<GameState>,
    grants: Vec<mpsc::Sender<TurnGrant>>,
    tasks: Vec<JoinHandle<ParticipantAgent>>,
    names: [String; 2],
    hands: [Vec<Tile>; 2],
    turns: Vec<TurnRecord>,
    initial: Vec<Tile>,
    sink: Option<Box<dyn DisplaySink>>,
}

impl Table {
    fn new(
        board: Arc<Board>,
        pool: Arc<TilePool>,
        initial: Vec<Tile>,
        sink: Option<Box<dyn DisplaySink>>,
    ) -> Self {
        let (state, _) = watch::channel(GameState::Setup);
        Self {
            board,
            pool,
            state,
            grants: Vec::with_capacity(SEATS),
            tasks: Vec::with_capacity(SEATS),
            names: Default::default(),
            hands: Default::default(),
            turns: Vec::new(),
            initial,
            sink,
        }
    }

    /// Deals each hand to a new participant and starts its task.
    #[instrument(skip_all)]
    fn seat(&mut self, sources: [Box<dyn DecisionSource>; 2], hands: [Vec<Tile>; 2]) {
        let seats = [Seat::One, Seat::Two];

        for ((seat, source), hand) in seats.into_iter().zip(sources).zip(hands) {
            let mut agent = ParticipantAgent::new(seat, source);
            agent.deal(hand.iter().copied());
            self.names[seat.index()] = agent.name().to_string();
            self.hands[seat.index()] = hand;

            let (grant_tx, grant_rx) = mpsc::channel(1);
            let task = tokio::spawn(participant_loop(
                agent,
                grant_rx,
                self.state.subscribe(),
                self.board.clone(),
                self.pool.clone(),
            ));
            self.grants.push(grant_tx);
            self.tasks.push(task);
            debug!(%seat, "Participant task started");
        }
    }

    /// Runs the alternation loop until a terminal condition is met.
    #[instrument(skip(self))]
    async fn play(&mut self, first: Seat) -> Result<Outcome, GameError> {
        let mut consecutive_no_move = 0;
        let mut active = first;
        self.publish(GameState::InProgress(active));

        loop {
            let turn = self.turns.len() + 1;
            self.emit(GameEvent::TurnStarted {
                turn,
                seat: active,
                name: self.names[active.index()].clone(),
            });

            let report = self.grant(active, turn).await?;
            let hand_size = report.hand.len();
            self.hands[active.index()] = report.hand;
            self.turns.push(TurnRecord::new(turn, active, report.outcome));
            debug!(turn, seat = %active, outcome = ?report.outcome, hand_size, "Turn reported");

            #[cfg(debug_assertions)]
            self.check_invariants()?;

            self.emit(GameEvent::TurnTaken {
                turn,
                seat: active,
                name: self.names[active.index()].clone(),
                outcome: report.outcome,
                board: self.board.tiles(),
                hand_size,
                pool_size: self.pool.len(),
            });

            if report.outcome.is_played() && hand_size == 0 {
                let outcome = Outcome::Winner(active);
                self.publish(GameState::Finished(outcome));
                return Ok(outcome);
            }

            consecutive_no_move = if report.outcome.is_no_move() {
                consecutive_no_move + 1
            } else {
                0
            };
            if consecutive_no_move >= SEATS {
                let outcome = Outcome::Stalemate;
                self.publish(GameState::Finished(outcome));
                return Ok(outcome);
            }

            active = active.opponent();
            self.publish(GameState::InProgress(active));
        }
    }

    /// Hands the token to `seat` and waits for its report.
    #[instrument(skip(self))]
    async fn grant(&self, seat: Seat, turn: usize) -> Result<TurnReport, GameError> {
        let unavailable = || GameError::new(GameErrorKind::ParticipantUnavailable(seat));
        let sender = self.grants.get(seat.index()).ok_or_else(unavailable)?;

        let (reply, response) = oneshot::channel();
        sender
            .send(TurnGrant { turn, reply })
            .await
            .map_err(|_| unavailable())?;
        response.await.map_err(|_| unavailable())?
    }

    /// Publishes the next game state to every participant.
    fn publish(&self, next: GameState) {
        let previous = self.state.send_replace(next);
        debug_assert!(
            previous.can_advance_to(&next),
            "illegal transition {:?} -> {:?}",
            previous,
            next
        );
        debug!(?previous, ?next, "State published");
    }

    fn emit(&mut self, event: GameEvent) {
        if let Some(sink) = self.sink.as_mut() {
            sink.show(&event);
        }
    }

    fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::new(
            self.board.tiles(),
            self.hands.clone(),
            self.pool.remaining(),
            self.turns.clone(),
            self.initial.clone(),
        )
    }

    #[cfg_attr(not(debug_assertions), allow(dead_code))]
    fn check_invariants(&self) -> Result<(), GameError> {
        DominoInvariants::check_all(&self.snapshot()).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            warn!(%descriptions, "Invariant violated");
            GameError::new(GameErrorKind::InvariantViolation(descriptions))
        })
    }

    /// Releases every participant task and waits for it to finish.
    ///
    /// Dropping the grant senders wakes a task still waiting for the token.
    #[instrument(skip(self))]
    async fn release(&mut self) -> Result<[ParticipantAgent; 2], GameError> {
        self.grants.clear();

        // Join every task before reporting, even after a failure.
        let mut agents = Vec::with_capacity(SEATS);
        let mut failed = None;
        for (task, seat) in self.tasks.drain(..).zip([Seat::One, Seat::Two]) {
            match task.await {
                Ok(agent) => agents.push(agent),
                Err(e) => {
                    error!(%seat, error = %e, "Participant task failed");
                    failed.get_or_insert(seat);
                }
            }
        }
        if let Some(seat) = failed {
            return Err(GameError::new(GameErrorKind::ParticipantUnavailable(seat)));
        }
        debug!("Participant tasks joined");

        agents
            .try_into()
            .map_err(|_| GameError::new(GameErrorKind::ParticipantUnavailable(Seat::One)))
    }
}

/// Body of a participant task.
///
/// Waits for a grant, takes one turn, reports, and repeats. Returns the agent
/// when the game is finished or the coordinator lets go of the grant channel.
#[instrument(skip_all, fields(seat = %agent.seat()))]
async fn participant_loop(
    mut agent: ParticipantAgent,
    mut grants: mpsc::Receiver<TurnGrant>,
    mut state: watch::Receiver<GameState>,
    board: Arc<Board>,
    pool: Arc<TilePool>,
) -> ParticipantAgent {
    loop {
        let grant = tokio::select! {
            biased;
            _ = state.wait_for(GameState::is_finished) => break,
            grant = grants.recv() => match grant {
                Some(grant) => grant,
                None => break,
            },
        };

        let published = *state.borrow_and_update();
        let report = if published == GameState::InProgress(agent.seat()) {
            agent
                .take_turn(&board, &pool)
                .await
                .map(|outcome| TurnReport {
                    outcome,
                    hand: agent.hand().tiles().to_vec(),
                })
        } else {
            warn!(turn = grant.turn, state = ?published, "Grant does not match published state");
            Err(GameError::new(GameErrorKind::TurnOutOfOrder {
                seat: agent.seat(),
                state: published,
            }))
        };

        if grant.reply.send(report).is_err() {
            debug!("Coordinator stopped listening");
            break;
        }
    }

    debug!("Participant released");
    agent
}
