use std::sync::mpsc;

use anyhow::{bail, Result};
use chrono::Utc;
use gittime_core::{ActivityViewModel, Msg, Viewer};
use gittime_engine::EngineHandle;
use gittime_logging::{gittime_debug, gittime_info, gittime_warn};

use crate::config::AppConfig;
use crate::effects::EffectRunner;
use crate::persistence;
use crate::render;
use crate::session::SessionDriver;

pub fn run(config: &AppConfig) -> Result<()> {
    let engine = EngineHandle::new(&config.fetch_settings())?;
    let mut driver = SessionDriver::new(EffectRunner::new(engine));
    let updates = driver.subscribe();

    let viewer = viewer_for(config);
    gittime_info!("starting session for {:?}", viewer);
    driver.dispatch(Msg::ViewerChanged(viewer.clone()));

    if let Some(user) = viewer.user_name() {
        if let Some(info) = persistence::load_contributions(&config.state_dir, user) {
            driver.dispatch(Msg::RestoreContributions(info));
        }
    }

    driver.dispatch(Msg::FirstLoad);
    settle(&mut driver, config, &updates)?;

    let mut pages = 1;
    let mut retried = false;
    loop {
        let view = driver.current();
        if view.stalled && !retried {
            gittime_warn!("retrying page {} once", view.page);
            retried = true;
            driver.dispatch(Msg::Retry);
        } else if view.can_load_more && pages < config.max_pages {
            pages += 1;
            driver.dispatch(Msg::LoadMore);
        } else {
            break;
        }
        settle(&mut driver, config, &updates)?;
    }

    let view = driver.current();
    if let (Some(user), Some(info)) = (viewer.user_name(), &view.contribution) {
        let saved_utc = Utc::now().to_rfc3339();
        if let Some(path) =
            persistence::save_contributions(&config.state_dir, user, info, saved_utc)
        {
            gittime_info!("saved contribution snapshot to {:?}", path);
        }
    }

    print!("{}", render::render(&view));
    Ok(())
}

fn viewer_for(config: &AppConfig) -> Viewer {
    if config.trial {
        return Viewer::Trial;
    }
    match config.user.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => Viewer::user(name),
        _ => Viewer::Nobody,
    }
}

fn settle(
    driver: &mut SessionDriver,
    config: &AppConfig,
    updates: &mpsc::Receiver<ActivityViewModel>,
) -> Result<()> {
    // Contributions may try the primary and the fallback before page one starts.
    let budget = config.request_timeout() * 4;
    let settled = driver.settle(budget);
    for view in updates.try_iter() {
        gittime_debug!(
            "view: page={} items={} loading={} stalled={}",
            view.page,
            view.activity_count,
            view.is_loading,
            view.stalled
        );
    }
    if !settled {
        bail!("no response within {:?}", budget);
    }
    Ok(())
}
