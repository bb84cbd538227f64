//! The snow check flow: scrape both resorts and compose the comparison.

use std::future::Future;
use std::time::Duration;

use log::{info, warn};

use crate::error::Result;

use super::browser::{Browser, BrowserLauncher};
use super::parse::{extract_brian_head, extract_lee_canyon};
use super::report::{Resort, SnowReading, format_report};

/// How long to wait for a page's marker text before parsing it anyway.
pub const MARKER_TIMEOUT: Duration = Duration::from_secs(15);

/// Progress notices for whoever asked for the check.
pub trait Announcer: Sync {
    fn announce(&self, text: &str) -> impl Future<Output = ()> + Send;
}

/// Scrape both resorts and return the formatted report.
///
/// The browser session is closed exactly once whenever it was started,
/// whether scraping succeeded or not.
///
/// # Errors
///
/// Fails when the browser cannot start, a page cannot be loaded or read,
/// or extraction fails. Marker timeouts are not errors.
pub async fn run_snowcheck<L, A>(launcher: &L, announcer: &A) -> Result<String>
where
    L: BrowserLauncher,
    A: Announcer,
{
    let mut session = launcher.launch().await?;
    let readings = scrape_resorts(&mut session, announcer).await;

    if let Err(e) = session.quit().await {
        warn!("Failed to close browser session: {e}");
    }

    let (brian_head, lee_canyon) = readings?;
    Ok(format_report(&brian_head, &lee_canyon))
}

async fn scrape_resorts<B, A>(session: &mut B, announcer: &A) -> Result<(SnowReading, SnowReading)>
where
    B: Browser,
    A: Announcer,
{
    let html = load_page(session, Resort::BrianHead, announcer).await?;
    let brian_head = SnowReading::from_day_night(Resort::BrianHead, extract_brian_head(&html)?);
    info!("Brian Head reading: {} inches", brian_head.total);

    let html = load_page(session, Resort::LeeCanyon, announcer).await?;
    let lee_canyon = SnowReading::past_24_hours(Resort::LeeCanyon, extract_lee_canyon(&html));
    info!("Lee Canyon reading: {} inches", lee_canyon.total);

    Ok((brian_head, lee_canyon))
}

/// Navigate to the resort page and return whatever HTML is loaded once the
/// marker shows up or the wait gives out.
async fn load_page<B, A>(session: &mut B, resort: Resort, announcer: &A) -> Result<String>
where
    B: Browser,
    A: Announcer,
{
    session.goto(resort.url()).await?;

    if let Err(e) = session.wait_for_text(resort.marker(), MARKER_TIMEOUT).await {
        warn!(
            "Marker '{}' not found on {} page, parsing anyway: {e}",
            resort.marker(),
            resort
        );
        announcer.announce(&resort.timeout_notice()).await;
    }

    session.page_source().await
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::error::BotError;

    const BRIAN_HEAD_HTML: &str = r#"
        <div class="m-snow-forecast">
          <h3>Snow Forecast</h3>
          <div class="m-snow-totals-top">6”</div>
          <div class="m-snow-totals-top">4”</div>
        </div>"#;

    const LEE_CANYON_HTML: &str = r"
        <h2>Snow Report</h2>
        <div><h4>Snowfall (24 hrs)</h4><p>12”</p></div>";

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Step {
        Launch,
        Goto(usize),
        Wait(usize),
        Source(usize),
    }

    #[derive(Default)]
    struct Counters {
        launches: AtomicUsize,
        quits: AtomicUsize,
    }

    struct FakeLauncher {
        fail_at: Option<Step>,
        counters: Arc<Counters>,
    }

    impl FakeLauncher {
        fn new(fail_at: Option<Step>) -> Self {
            Self {
                fail_at,
                counters: Arc::default(),
            }
        }

        fn launches(&self) -> usize {
            self.counters.launches.load(Ordering::SeqCst)
        }

        fn quits(&self) -> usize {
            self.counters.quits.load(Ordering::SeqCst)
        }
    }

    struct FakeSession {
        fail_at: Option<Step>,
        page: Option<usize>,
        visits: usize,
        counters: Arc<Counters>,
    }

    impl FakeSession {
        fn check(&self, step: Step) -> Result<()> {
            if self.fail_at == Some(step) {
                Err(BotError::Scrape(format!("simulated failure at {step:?}")))
            } else {
                Ok(())
            }
        }

        fn current(&self) -> usize {
            self.page.unwrap_or(usize::MAX)
        }
    }

    impl BrowserLauncher for FakeLauncher {
        type Session = FakeSession;

        async fn launch(&self) -> Result<FakeSession> {
            if self.fail_at == Some(Step::Launch) {
                return Err(BotError::Scrape("no browser".to_string()));
            }
            self.counters.launches.fetch_add(1, Ordering::SeqCst);
            Ok(FakeSession {
                fail_at: self.fail_at,
                page: None,
                visits: 0,
                counters: Arc::clone(&self.counters),
            })
        }
    }

    impl Browser for FakeSession {
        async fn goto(&mut self, _url: &str) -> Result<()> {
            let page = self.visits;
            self.visits += 1;
            self.check(Step::Goto(page))?;
            self.page = Some(page);
            Ok(())
        }

        async fn wait_for_text(&mut self, _text: &str, _timeout: Duration) -> Result<()> {
            self.check(Step::Wait(self.current()))
        }

        async fn page_source(&mut self) -> Result<String> {
            self.check(Step::Source(self.current()))?;
            Ok(match self.page {
                Some(0) => BRIAN_HEAD_HTML.to_string(),
                Some(1) => LEE_CANYON_HTML.to_string(),
                _ => String::new(),
            })
        }

        async fn quit(self) -> Result<()> {
            self.counters.quits.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingAnnouncer {
        notices: Mutex<Vec<String>>,
    }

    impl RecordingAnnouncer {
        fn notices(&self) -> Vec<String> {
            self.notices.lock().expect("lock poisoned").clone()
        }
    }

    impl Announcer for RecordingAnnouncer {
        async fn announce(&self, text: &str) {
            self.notices
                .lock()
                .expect("lock poisoned")
                .push(text.to_string());
        }
    }

    #[tokio::test]
    async fn compares_both_resorts() -> Result<()> {
        let launcher = FakeLauncher::new(None);
        let announcer = RecordingAnnouncer::default();

        let report = run_snowcheck(&launcher, &announcer).await?;

        assert!(report.contains("**Brian Head** – 10” total (🌞 6” / 🌙 4”)"));
        assert!(report.contains("**Lee Canyon** – 12” total (past 24 hrs)"));
        assert!(report.ends_with("**Lee Canyon has more snow today..**"));
        assert!(announcer.notices().is_empty());
        assert_eq!(launcher.launches(), 1);
        assert_eq!(launcher.quits(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn marker_timeouts_are_announced_and_parsing_continues() -> Result<()> {
        for (step, notice) in [
            (Step::Wait(0), Resort::BrianHead.timeout_notice()),
            (Step::Wait(1), Resort::LeeCanyon.timeout_notice()),
        ] {
            let launcher = FakeLauncher::new(Some(step));
            let announcer = RecordingAnnouncer::default();

            let report = run_snowcheck(&launcher, &announcer).await?;

            assert!(report.starts_with("**Snow Report:**"));
            assert_eq!(announcer.notices(), vec![notice]);
            assert_eq!(launcher.quits(), 1);
        }
        Ok(())
    }

    #[tokio::test]
    async fn session_is_released_once_on_every_failure() {
        for step in [
            Step::Goto(0),
            Step::Source(0),
            Step::Goto(1),
            Step::Source(1),
        ] {
            let launcher = FakeLauncher::new(Some(step));
            let announcer = RecordingAnnouncer::default();

            let result = run_snowcheck(&launcher, &announcer).await;

            assert!(
                matches!(result, Err(BotError::Scrape(_))),
                "step={step:?}"
            );
            assert_eq!(launcher.launches(), 1, "step={step:?}");
            assert_eq!(launcher.quits(), 1, "step={step:?}");
        }
    }

    #[tokio::test]
    async fn failed_launch_has_nothing_to_release() {
        let launcher = FakeLauncher::new(Some(Step::Launch));
        let announcer = RecordingAnnouncer::default();

        let result = run_snowcheck(&launcher, &announcer).await;

        assert!(result.is_err());
        assert_eq!(launcher.quits(), 0);
    }
}
