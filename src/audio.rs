//! Sequential audio feedback.
//!
//! Cues come from pointer gestures and network callbacks alike. They all go
//! through one [`AudioQueue`] and are played one at a time, in arrival
//! order, by the single consumer task run by [`AudioScheduler`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, error::TryRecvError};
use tokio::task::JoinHandle;

/// A sound resource that can be queued for playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    NewGame,
    Shot,
    Hit,
    Miss,
    EnemyHit,
    OwnHit,
    LostOwnShip,
    Sinking,
    EnemySunk,
    OwnSunk,
    LostPoint,
    Ending,
    Error,
    /// First half of the coordinate read-out ("letter").
    EnterLetter,
    /// Second half of the coordinate read-out ("number").
    EnterNumber,
}

impl Cue {
    /// Path of the sound file relative to the page root.
    pub fn resource(&self) -> &'static str {
        match self {
            Cue::NewGame => "sounds/new_game.mp3",
            Cue::Shot => "sounds/shot_1.mp3",
            Cue::Hit => "sounds/shot_2_hit.mp3",
            Cue::Miss => "sounds/shot_2_water.mp3",
            Cue::EnemyHit => "sounds/shot_3_enemy_ship_hit.mp3",
            Cue::OwnHit => "sounds/shot_3_own_ship_has_been_hit.mp3",
            Cue::LostOwnShip => "sounds/lost_own_ship_1.mp3",
            Cue::Sinking => "sounds/enemy_ship_1_anime_ship_is_sinking.mp3",
            Cue::EnemySunk => "sounds/enemy_ship_3_anime_ship_sunk.mp3",
            Cue::OwnSunk => "sounds/lost_own_ship_3_our_ship_has_sunk.mp3",
            Cue::LostPoint => "sounds/enemy_ship_2_lost_peep_for_each_length_point.mp3",
            Cue::Ending => "sounds/ending.mp3",
            Cue::Error => "sounds/error.mp3",
            Cue::EnterLetter => "sounds/enter_coordinates_first_letter.mp3",
            Cue::EnterNumber => "sounds/enter_coordinates_second_number.mp3",
        }
    }
}

/// Cloneable handle used to enqueue cues.
#[derive(Debug, Clone)]
pub struct AudioQueue {
    tx: mpsc::UnboundedSender<Cue>,
}

impl AudioQueue {
    /// Queue handle plus the receiving end a scheduler drains.
    pub fn unbounded() -> (Self, mpsc::UnboundedReceiver<Cue>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Append `cue` to the tail of the queue. Never blocks.
    pub fn enqueue(&self, cue: Cue) {
        if self.tx.send(cue).is_err() {
            log::warn!("audio scheduler is gone, dropping cue {:?}", cue);
        }
    }

    pub fn enqueue_all<I: IntoIterator<Item = Cue>>(&self, cues: I) {
        for cue in cues {
            self.enqueue(cue);
        }
    }
}

/// Something that can play a cue.
///
/// `play` resolves once playback has completed; that is the completion
/// signal the scheduler waits for before starting the next cue.
#[async_trait::async_trait]
pub trait AudioSink: Send {
    async fn play(&mut self, cue: Cue) -> anyhow::Result<()>;
}

/// FIFO drain loop around an [`AudioSink`].
pub struct AudioScheduler<S: AudioSink> {
    rx: mpsc::UnboundedReceiver<Cue>,
    sink: S,
    playing: Arc<AtomicBool>,
}

/// Handle to a scheduler running on its own task.
pub struct SchedulerHandle<S> {
    playing: Arc<AtomicBool>,
    task: JoinHandle<S>,
}

impl<S> SchedulerHandle<S> {
    /// Whether a cue is currently being played.
    pub fn is_playing(&self) -> bool {
        self.playing.load(Ordering::SeqCst)
    }

    /// Wait for the scheduler to drain and hand the sink back. The scheduler
    /// only stops once every [`AudioQueue`] clone has been dropped.
    pub async fn join(self) -> anyhow::Result<S> {
        Ok(self.task.await?)
    }
}

impl<S: AudioSink + 'static> AudioScheduler<S> {
    pub fn new(rx: mpsc::UnboundedReceiver<Cue>, sink: S) -> Self {
        Self {
            rx,
            sink,
            playing: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Start a scheduler on a new task.
    pub fn spawn(sink: S) -> (AudioQueue, SchedulerHandle<S>) {
        let (queue, rx) = AudioQueue::unbounded();
        let scheduler = Self::new(rx, sink);
        let playing = scheduler.playing.clone();
        let task = tokio::spawn(scheduler.run());
        (queue, SchedulerHandle { playing, task })
    }

    pub fn is_playing(&self) -> bool {
        self.playing.load(Ordering::SeqCst)
    }

    /// Play queued cues until every sender is dropped, then return the sink.
    pub async fn run(mut self) -> S {
        let mut next = self.rx.recv().await;
        while let Some(cue) = next {
            self.playing.store(true, Ordering::SeqCst);
            log::debug!("playing {}", cue.resource());
            if let Err(e) = self.sink.play(cue).await {
                // No retry: the failed cue is skipped and the queue moves on.
                log::warn!("playback of {} failed: {}", cue.resource(), e);
            }
            next = match self.rx.try_recv() {
                Ok(cue) => Some(cue),
                Err(TryRecvError::Empty) => {
                    self.playing.store(false, Ordering::SeqCst);
                    self.rx.recv().await
                }
                Err(TryRecvError::Disconnected) => None,
            };
        }
        self.playing.store(false, Ordering::SeqCst);
        self.sink
    }
}

/// Headless sink: logs each cue and holds for a fixed duration.
#[derive(Debug, Clone)]
pub struct LoggingSink {
    cue_duration: Duration,
}

impl LoggingSink {
    pub fn new(cue_duration: Duration) -> Self {
        Self { cue_duration }
    }
}

#[async_trait::async_trait]
impl AudioSink for LoggingSink {
    async fn play(&mut self, cue: Cue) -> anyhow::Result<()> {
        log::info!("cue {:?} ({})", cue, cue.resource());
        tokio::time::sleep(self.cue_duration).await;
        Ok(())
    }
}
