use std::path::Path;
use std::thread;

use crate::error::Result;
use crate::SaveSummary;

/// Parses `path` on a newly spawned thread and delivers the result to
/// `completion` from that thread once parsing finishes.
///
/// There is one thread per call; no pool, no queue, no cancellation. A
/// caller that needs completions delivered on a particular thread (for
/// example, a single-threaded host runtime observing the result through an
/// FFI boundary) is responsible for marshaling `completion`'s invocation
/// there itself — this crate makes no promise about which thread runs it,
/// only that it runs exactly once, after the parse it corresponds to has
/// fully finished.
pub fn parse_async<P, F>(path: P, quick: bool, completion: F)
where
    P: AsRef<Path> + Send + 'static,
    F: FnOnce(Result<SaveSummary>) + Send + 'static,
{
    thread::spawn(move || {
        let result = crate::parse(path.as_ref(), quick);
        completion(result);
    });
}
