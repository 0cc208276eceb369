use hoop_core::Point;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
};

/// Parse a click typed as `x y` (a comma works as separator too).
pub(crate) fn parse_click(line: &str) -> Option<Point> {
    let mut parts = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty());
    let x = parts.next()?.parse().ok()?;
    let y = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Point::new(x, y))
}

/// Read clicks from stdin until it closes or the pipeline goes away.
pub fn spawn_stdin_clicks(clicks: mpsc::UnboundedSender<Point>) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => match parse_click(&line) {
                    Some(click) => {
                        if clicks.send(click).is_err() {
                            break;
                        }
                    }
                    None => tracing::warn!("Expected a click as `x y`, got {:?}", line),
                },
                Ok(None) => break,
                Err(err) => {
                    tracing::warn!("Failed to read stdin: {}", err);
                    break;
                }
            }
        }
        tracing::debug!("Stopped reading clicks from stdin");
    });
}
