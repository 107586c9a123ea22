use crate::shortcuts::ShortcutRecord;

/// Hands the shortcut target to the OS default handler without waiting on it.
///
/// Missing targets or unknown types are reported by the handler itself; we
/// only log when the handler could not be spawned at all.
pub fn activate_shortcut(record: &ShortcutRecord) {
    tracing::info!(
        label = record.label.as_str(),
        target = record.target_path.as_str(),
        category = %record.category,
        "activating shortcut"
    );
    if let Err(err) = open::that_detached(&record.target_path) {
        tracing::warn!(
            ?err,
            target = record.target_path.as_str(),
            "failed to hand shortcut target to the OS"
        );
    }
}
