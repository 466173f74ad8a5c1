// src/runner.rs
//
// login → discover → (plan | shaper) → sign-out, raced against an
// interrupt. Whatever happens after login, sign-out runs before we return.

use std::future::Future;

use crate::config::consts::SIGN_OUT_TIMEOUT;
use crate::config::options::{Credentials, Mode, RunOptions, ShaperRequest};
use crate::core::net::Transport;
use crate::error::{PortalError, Result};
use crate::plan::check_psid;
use crate::prompt::Prompter;
use crate::session::{Discovery, Session};
use crate::{shaper, table};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// Nothing was changed (no `--commit`).
    Previewed,
    /// The portal acknowledged the change.
    Committed,
}

/// Run one session. `interrupt` hands out a future per wait: the first one
/// resolving stops the current step and drops the in-flight request. The
/// session is then signed out, bounded by [`SIGN_OUT_TIMEOUT`] and cut short
/// by a second interrupt.
pub async fn run<T, P, I, C>(
    transport: T,
    opts: &RunOptions,
    creds: &Credentials,
    prompter: &mut P,
    mut interrupt: I,
) -> Result<RunOutcome>
where
    T: Transport,
    P: Prompter,
    I: FnMut() -> C,
    C: Future<Output = ()>,
{
    let mut session = Session::new(transport, opts.base_url.clone());

    let result = {
        let work = pipeline(&mut session, opts, creds, prompter);
        let cancel = interrupt();
        tokio::pin!(work);
        tokio::pin!(cancel);
        tokio::select! {
            biased;
            r = &mut work => r,
            _ = &mut cancel => {
                logf!("Interrupted.");
                Err(PortalError::Interrupted)
            }
        }
    };

    if session.is_established() {
        let again = interrupt();
        tokio::pin!(again);
        tokio::select! {
            biased;
            r = tokio::time::timeout(SIGN_OUT_TIMEOUT, session.sign_out()) => match r {
                Ok(Ok(())) => {}
                Ok(Err(e)) => loge!("Sign-out failed: {e}"),
                Err(_) => loge!("Sign-out gave no answer within {}s; giving up.", SIGN_OUT_TIMEOUT.as_secs()),
            },
            _ = &mut again => logf!("Interrupted again; skipping sign-out."),
        }
    }
    result
}

async fn pipeline<T: Transport, P: Prompter>(
    session: &mut Session<T>,
    opts: &RunOptions,
    creds: &Credentials,
    prompter: &mut P,
) -> Result<RunOutcome> {
    logf!("Commit is {}.", if opts.commit { "True" } else { "False" });
    let landing = session.login(creds).await?;
    let found = session.discover(&landing, opts.latest).await?;

    match opts.mode {
        Mode::Plan => change_plan(session, opts, &found, prompter).await,
        Mode::Shaper(req) => change_shaper(session, opts, &found, req, prompter).await,
    }
}

async fn change_plan<T: Transport, P: Prompter>(
    session: &mut Session<T>,
    opts: &RunOptions,
    found: &Discovery,
    prompter: &mut P,
) -> Result<RunOutcome> {
    prompter.say(&table::plans(&found.offers, &found.record.current_psid));

    let psid = choose_psid(opts, found, prompter).await?;
    let committed = session.confirm(&found.record, &psid, opts.commit).await?;
    Ok(if committed { RunOutcome::Committed } else { RunOutcome::Previewed })
}

/// The psid from the command line when valid; otherwise ask until a valid
/// one is entered. Without a terminal there is nobody to ask again, so an
/// invalid answer aborts.
pub async fn choose_psid<P: Prompter>(
    opts: &RunOptions,
    found: &Discovery,
    prompter: &mut P,
) -> Result<String> {
    let valid = |p: &str| check_psid(p, &found.record.current_psid, &found.offers, opts.latest);

    if let Some(p) = opts.psid.as_deref() {
        if valid(p) {
            logf!("Requested psid is valid.");
            return Ok(s!(p));
        }
        logf!("Requested psid is not valid.");
        if !prompter.interactive() {
            return Err(PortalError::InvalidPsid(s!(p)));
        }
    }

    loop {
        let Some(answer) = prompter.line("Please enter psid: ").await? else {
            return Err(PortalError::InvalidPsid(opts.psid.clone().unwrap_or_default()));
        };
        let answer = answer.trim();
        if valid(answer) {
            logf!("Requested psid is valid.");
            return Ok(s!(answer));
        }
        logf!("Requested psid is not valid.");
        if !prompter.interactive() {
            return Err(PortalError::InvalidPsid(s!(answer)));
        }
    }
}

async fn change_shaper<T: Transport, P: Prompter>(
    session: &mut Session<T>,
    opts: &RunOptions,
    found: &Discovery,
    req: ShaperRequest,
    prompter: &mut P,
) -> Result<RunOutcome> {
    let settings = session.shaper_settings(&found.advanced_info).await?;
    let plan = found
        .current_plan
        .as_ref()
        .ok_or_else(|| PortalError::missing(join!("offer for current psid ", &found.record.current_psid)))?;

    let rated = shaper::rated_speeds(plan)?;
    logd!("Rated speed {}/{} from '{}'", rated.0, rated.1, plan.display_name);
    let commit = shaper::compute(rated, req);
    prompter.say(&table::shaper(&settings, Some(commit)));

    shaper::validate(commit, &settings)?;
    if !opts.commit {
        logf!("Commit is False; shaper unchanged.");
        return Ok(RunOutcome::Previewed);
    }
    session.submit_shaper(&settings, commit).await?;
    Ok(RunOutcome::Committed)
}
