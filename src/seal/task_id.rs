/// Longest task id accepted by [`is_valid_task_id`].
pub const MAX_TASK_ID_LEN: usize = 64;

/// Returns `true` when `task_id` matches `[A-Za-z0-9._:-]{1,64}`.
///
/// The token format itself only requires the task id to be a string; this
/// stricter charset is enforced by callers before they seal.
pub fn is_valid_task_id(task_id: &str) -> bool {
    !task_id.is_empty()
        && task_id.len() <= MAX_TASK_ID_LEN
        && task_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | ':' | '-'))
}
