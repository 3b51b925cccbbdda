//! Memory jobs: delayed closures with optional re-trigger and debounce
//! semantics, run on the renderer thread between input and drawing.

use std::time::{Duration, Instant};

use crate::element::Element;

/// Memory job flags.
pub mod flags {
    /// Posting a same-id job restarts the queued entry's timer instead
    /// of enqueuing a second copy (debounce).
    pub const PROLONG_MEMORY: u8 = 1 << 0;
    /// The job re-arms after running instead of being removed.
    pub const RETRIGGER: u8 = 1 << 1;
}

/// A scheduled job; receives the root element.
pub type Job = Box<dyn FnMut(&mut Element) -> bool>;

/// One queued memory.
pub struct Memory {
    start: Instant,
    delay: Duration,
    job: Job,
    flags: u8,
    id: String,
}

impl Memory {
    /// Check a flag.
    pub const fn is(&self, flag: u8) -> bool {
        self.flags & flag != 0
    }

    /// The job id.
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// The memory queue.
#[derive(Default)]
pub struct Scheduler {
    jobs: Vec<Memory>,
}

impl Scheduler {
    /// An empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of queued jobs.
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Returns true when no job is queued.
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Queue a job to run `delay` after `now`. With
    /// [`flags::PROLONG_MEMORY`] and a non-empty id, a queued same-id
    /// entry is re-armed at `now` instead and the new job is dropped.
    pub fn remember(
        &mut self,
        now: Instant,
        delay: Duration,
        job_flags: u8,
        id: impl Into<String>,
        job: Job,
    ) {
        let id = id.into();
        if job_flags & flags::PROLONG_MEMORY != 0
            && !id.is_empty()
            && let Some(existing) = self.jobs.iter_mut().find(|m| m.id == id)
        {
            existing.start = now;
            return;
        }
        self.jobs.push(Memory {
            start: now,
            delay,
            job,
            flags: job_flags,
            id,
        });
    }

    /// Run every job whose delay has elapsed at `now`. Re-triggering
    /// jobs restart from `now`; the rest are removed. Returns true when
    /// any job ran.
    pub fn tick(&mut self, now: Instant, root: &mut Element) -> bool {
        let mut ran = false;
        let mut i = 0;
        while i < self.jobs.len() {
            let due = now.duration_since(self.jobs[i].start) >= self.jobs[i].delay;
            if !due {
                i += 1;
                continue;
            }
            ran = true;
            let retrigger = {
                let m = &mut self.jobs[i];
                let _ = (m.job)(root);
                m.is(flags::RETRIGGER)
            };
            if retrigger {
                self.jobs[i].start = now;
                i += 1;
            } else {
                self.jobs.remove(i);
            }
        }
        ran
    }

    /// Time until the next job is due at `now`, or `None` when the
    /// queue is empty. Zero when something is already overdue.
    pub fn next_deadline(&self, now: Instant) -> Option<Duration> {
        self.jobs
            .iter()
            .map(|m| {
                let elapsed = now.duration_since(m.start);
                m.delay.saturating_sub(elapsed)
            })
            .min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell as StdCell;
    use std::rc::Rc;

    fn counter() -> (Rc<StdCell<u32>>, Job) {
        let count = Rc::new(StdCell::new(0));
        let c = Rc::clone(&count);
        (
            count,
            Box::new(move |_| {
                c.set(c.get() + 1);
                true
            }),
        )
    }

    #[test]
    fn job_runs_once_after_delay() {
        let mut s = Scheduler::new();
        let mut root = Element::plain();
        let now = Instant::now();
        let (count, job) = counter();
        s.remember(now, Duration::from_millis(50), 0, "", job);

        assert!(!s.tick(now, &mut root));
        assert_eq!(count.get(), 0);

        assert!(s.tick(now + Duration::from_millis(50), &mut root));
        assert_eq!(count.get(), 1);
        assert!(s.is_empty());
    }

    #[test]
    fn retrigger_job_rearms() {
        let mut s = Scheduler::new();
        let mut root = Element::plain();
        let now = Instant::now();
        let (count, job) = counter();
        s.remember(now, Duration::from_millis(10), flags::RETRIGGER, "tick", job);

        s.tick(now + Duration::from_millis(10), &mut root);
        s.tick(now + Duration::from_millis(20), &mut root);
        assert_eq!(count.get(), 2);
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn prolong_debounces_same_id() {
        let mut s = Scheduler::new();
        let mut root = Element::plain();
        let t0 = Instant::now();
        let (count, job) = counter();
        s.remember(t0, Duration::from_millis(50), flags::PROLONG_MEMORY, "x", job);

        // Second post within the same tick re-arms the first entry.
        let t1 = t0 + Duration::from_millis(30);
        let (count2, job2) = counter();
        s.remember(t1, Duration::from_millis(50), flags::PROLONG_MEMORY, "x", job2);
        assert_eq!(s.len(), 1);

        // Not due at the original deadline.
        assert!(!s.tick(t0 + Duration::from_millis(50), &mut root));
        assert_eq!(count.get(), 0);

        // Due 50ms after the later post; executes exactly once.
        assert!(s.tick(t1 + Duration::from_millis(50), &mut root));
        assert_eq!(count.get(), 1);
        assert_eq!(count2.get(), 0);
    }

    #[test]
    fn distinct_ids_do_not_debounce() {
        let mut s = Scheduler::new();
        let now = Instant::now();
        let (_, a) = counter();
        let (_, b) = counter();
        s.remember(now, Duration::from_millis(10), flags::PROLONG_MEMORY, "a", a);
        s.remember(now, Duration::from_millis(10), flags::PROLONG_MEMORY, "b", b);
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn next_deadline_reports_soonest() {
        let mut s = Scheduler::new();
        let now = Instant::now();
        assert_eq!(s.next_deadline(now), None);
        let (_, a) = counter();
        let (_, b) = counter();
        s.remember(now, Duration::from_millis(80), 0, "", a);
        s.remember(now, Duration::from_millis(30), 0, "", b);
        assert_eq!(s.next_deadline(now), Some(Duration::from_millis(30)));
        // Overdue jobs report zero.
        assert_eq!(
            s.next_deadline(now + Duration::from_millis(100)),
            Some(Duration::ZERO)
        );
    }
}
