use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use log::debug;
use tokio::{
    sync::mpsc::Sender,
    task::JoinHandle,
    time::{MissedTickBehavior, interval, sleep},
};

/// How long the terminal size must stay put before the scene is rebuilt.
pub const RESIZE_QUIET_PERIOD: Duration = Duration::from_millis(150);

#[derive(Debug)]
pub enum AppEvent {
    Bootstrap,
    TickFrame(u64),
    Input(Event),
    ResizeSettled {
        generation: u64,
        width: u16,
        height: u16,
    },
    Quit,
}

pub fn spawn_input_task() -> impl futures::Stream<Item = Event> {
    EventStream::new().filter_map(|event| async move { event.ok() })
}

#[derive(Debug)]
pub struct FrameHandle {
    generation: u64,
    task: Option<JoinHandle<()>>,
}

impl FrameHandle {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for FrameHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

pub fn start_frame_task(tx: Sender<AppEvent>, fps: u8, generation: u64) -> FrameHandle {
    let fps = fps.clamp(15, 60);
    let task = tokio::spawn(async move {
        let mut ticker = interval(Duration::from_millis(1000_u64 / u64::from(fps)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            if tx.send(AppEvent::TickFrame(generation)).await.is_err() {
                break;
            }
        }
    });
    FrameHandle {
        generation,
        task: Some(task),
    }
}

#[derive(Debug, Default)]
pub struct ResizeDebouncer {
    generation: u64,
    pending: Option<JoinHandle<()>>,
}

impl ResizeDebouncer {
    pub fn schedule(&mut self, tx: &Sender<AppEvent>, width: u16, height: u16) -> u64 {
        self.cancel();
        let generation = self.generation;
        let tx = tx.clone();
        self.pending = Some(tokio::spawn(async move {
            sleep(RESIZE_QUIET_PERIOD).await;
            let _ = tx
                .send(AppEvent::ResizeSettled {
                    generation,
                    width,
                    height,
                })
                .await;
        }));
        generation
    }

    pub fn cancel(&mut self) {
        if let Some(task) = self.pending.take() {
            task.abort();
        }
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn settle(&mut self, generation: u64) -> bool {
        if generation != self.generation || self.pending.is_none() {
            debug!("dropping stale resize settle #{generation}");
            return false;
        }
        self.pending = None;
        true
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for ResizeDebouncer {
    fn drop(&mut self) {
        if let Some(task) = self.pending.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;

    use super::*;

    fn drain(rx: &mut mpsc::Receiver<AppEvent>) -> Vec<AppEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[tokio::test(start_paused = true)]
    async fn resize_burst_settles_once_with_last_size() {
        let (tx, mut rx) = mpsc::channel(16);
        let mut debouncer = ResizeDebouncer::default();
        let mut last = 0;
        for width in [80, 90, 100, 110] {
            last = debouncer.schedule(&tx, width, 40);
            sleep(Duration::from_millis(50)).await;
        }
        assert!(drain(&mut rx).is_empty());

        sleep(Duration::from_millis(200)).await;
        let events = drain(&mut rx);
        assert_eq!(events.len(), 1);
        match events[0] {
            AppEvent::ResizeSettled {
                generation,
                width,
                height,
            } => {
                assert_eq!(generation, last);
                assert_eq!((width, height), (110, 40));
                assert!(debouncer.settle(generation));
            }
            ref other => panic!("unexpected event {other:?}"),
        }
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_debounce_never_fires() {
        let (tx, mut rx) = mpsc::channel(16);
        let mut debouncer = ResizeDebouncer::default();
        debouncer.schedule(&tx, 120, 30);
        assert!(debouncer.is_pending());
        debouncer.cancel();
        sleep(Duration::from_millis(500)).await;
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_debouncer_aborts_timer() {
        let (tx, mut rx) = mpsc::channel(16);
        {
            let mut debouncer = ResizeDebouncer::default();
            debouncer.schedule(&tx, 120, 30);
        }
        sleep(Duration::from_millis(500)).await;
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn settle_from_superseded_schedule_is_stale() {
        let (tx, _rx) = mpsc::channel(16);
        let mut debouncer = ResizeDebouncer::default();
        let first = debouncer.schedule(&tx, 80, 24);
        let second = debouncer.schedule(&tx, 100, 24);
        assert_ne!(first, second);
        assert!(!debouncer.settle(first));
        assert!(debouncer.settle(second));
        assert!(!debouncer.settle(second));
    }

    #[tokio::test(start_paused = true)]
    async fn frame_task_tags_ticks_and_stops_on_cancel() {
        let (tx, mut rx) = mpsc::channel(64);
        let mut handle = start_frame_task(tx, 30, 7);
        assert_eq!(handle.generation(), 7);
        sleep(Duration::from_millis(110)).await;

        let ticks = drain(&mut rx);
        assert!(ticks.len() >= 2, "got {} ticks", ticks.len());
        assert!(ticks.iter().all(|event| matches!(event, AppEvent::TickFrame(7))));

        handle.cancel();
        assert!(!handle.is_running());
        sleep(Duration::from_millis(200)).await;
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_frame_handle_stops_ticking() {
        let (tx, mut rx) = mpsc::channel(64);
        drop(start_frame_task(tx, 60, 1));
        sleep(Duration::from_millis(200)).await;
        assert!(drain(&mut rx).is_empty());
    }
}
