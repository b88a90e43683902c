use futures::stream::{self, Stream, TryStreamExt};
use tokio::sync::mpsc;

use crate::error::SourceError;
use crate::license::classifier::{Classifier, LicensePolicy};
use crate::models::{ClassificationResult, DependencyRecord};
use crate::source::{self as report_source, RecordResult, Source};

/// Records buffered between the reader and the classifier.
const CHANNEL_CAPACITY: usize = 64;

/// Classify every record of `records`, one at a time.
///
/// The first `Err` ends the run: the partial classification is dropped and
/// the error returned. The result is only produced once the stream ends
/// cleanly.
pub async fn classify_stream<S, E>(records: S, policy: LicensePolicy) -> Result<ClassificationResult, E>
where
    S: Stream<Item = Result<DependencyRecord, E>>,
{
    let classifier = records
        .try_fold(Classifier::new(policy), |mut classifier, record| async move {
            classifier.accept(record);
            Ok::<_, E>(classifier)
        })
        .await?;

    tracing::debug!(records = classifier.accepted(), "classification finished");
    Ok(classifier.finish())
}

fn receiver_stream(rx: mpsc::Receiver<RecordResult>) -> impl Stream<Item = RecordResult> {
    stream::unfold(rx, |mut rx| async move { rx.recv().await.map(|item| (item, rx)) })
}

/// Read the report from `source` and classify it under `policy`.
pub async fn run(source: Source, policy: LicensePolicy) -> Result<ClassificationResult, SourceError> {
    let origin = source.origin();
    tracing::debug!(origin = %origin, "reading license report");

    let (rx, reader) = report_source::spawn_reader(source, CHANNEL_CAPACITY)?;
    let result = classify_stream(receiver_stream(rx), policy).await?;

    // A reader that died without sending an error closes the channel just like
    // a clean end of input; only its join result tells the two apart.
    if let Err(err) = reader.await {
        tracing::debug!(origin = %origin, error = %err, "reader task failed");
        return Err(SourceError::Aborted { origin });
    }

    Ok(result)
}
