//! Termination-signal handling. One table maps each handled signal to its
//! conventional exit status (128 plus the signal number); a single waiter
//! races the streams and reports the first code to arrive. The caller owns
//! cleanup and the actual exit.

use std::io;

#[cfg(unix)]
fn signal_table() -> [(tokio::signal::unix::SignalKind, i32); 3] {
    use tokio::signal::unix::SignalKind;

    [
        (SignalKind::hangup(), 128 + 1),
        (SignalKind::interrupt(), 128 + 2),
        (SignalKind::terminate(), 128 + 15),
    ]
}

/// Wait until the process receives a termination signal and return the exit
/// status the process should finish with.
#[cfg(unix)]
pub async fn wait_for_termination() -> io::Result<i32> {
    use tokio::signal::unix::signal;

    let mut streams = Vec::with_capacity(signal_table().len());
    for (kind, code) in signal_table() {
        streams.push((signal(kind)?, code));
    }

    let waiters = streams
        .iter_mut()
        .map(|(stream, code)| {
            let code = *code;
            Box::pin(async move {
                stream.recv().await;
                code
            })
        })
        .collect::<Vec<_>>();

    let (code, _, _) = futures::future::select_all(waiters).await;
    Ok(code)
}

/// Windows fallback: only Ctrl+C is supported, reported as the interrupt code.
#[cfg(not(unix))]
pub async fn wait_for_termination() -> io::Result<i32> {
    tokio::signal::ctrl_c().await?;
    Ok(128 + 2)
}
