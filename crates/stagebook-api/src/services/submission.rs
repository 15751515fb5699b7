//! Submission pipeline
//!
//! One linear workflow per request: extract multipart parts and stage the
//! attachments → persist a booking when a well-formed owner id was submitted
//! → send the notification → release every staged file, whatever happened.

use axum::extract::Multipart;
use uuid::Uuid;

use stagebook_core::models::SubmissionFields;
use stagebook_core::AppError;
use stagebook_storage::{StagedFile, TempStore};

use crate::services::email::MailAttachment;
use crate::state::AppState;

/// File slots accepted by the form; at most one file each.
const FILE_SLOTS: [&str; 2] = ["gstFile", "govIdFile"];

/// One staged upload plus the metadata needed to mail it.
pub struct StagedUpload {
    pub slot: &'static str,
    pub file: StagedFile,
    pub content_type: String,
}

/// What the pipeline produced for one request.
#[derive(Debug)]
pub struct SubmissionReceipt {
    pub booking_id: Option<Uuid>,
    pub email_sent: bool,
}

/// Run the full pipeline. Staged files are released on every exit path,
/// including failures inside extraction itself.
pub async fn process(
    state: &AppState,
    multipart: Multipart,
) -> Result<SubmissionReceipt, AppError> {
    let mut staged: Vec<StagedUpload> = Vec::new();
    let result = run_pipeline(state, multipart, &mut staged).await;
    release_staged(&state.temp_store, &staged).await;
    result
}

async fn run_pipeline(
    state: &AppState,
    multipart: Multipart,
    staged: &mut Vec<StagedUpload>,
) -> Result<SubmissionReceipt, AppError> {
    let fields = collect_parts(state, multipart, staged).await?;

    let booking_id = match parse_owner_id(fields.user_id.as_deref()) {
        Some(owner_id) => {
            let payload = serde_json::to_value(&fields)?;
            let booking = state.bookings.create(Some(owner_id), payload).await?;
            tracing::info!(booking_id = %booking.id, owner_id = %owner_id, "Booking persisted");
            Some(booking.id)
        }
        None => None,
    };

    let attachments = load_attachments(state, staged).await?;

    match state.mailer.send_submission(&fields, attachments).await {
        Ok(()) => Ok(SubmissionReceipt {
            booking_id,
            email_sent: true,
        }),
        Err(err) => {
            if let Some(id) = booking_id {
                // The booking exists; report the partial outcome instead of
                // collapsing it into the delivery failure.
                tracing::error!(
                    booking_id = %id,
                    error = %err,
                    "Notification failed after booking was saved"
                );
                Ok(SubmissionReceipt {
                    booking_id: Some(id),
                    email_sent: false,
                })
            } else {
                Err(err)
            }
        }
    }
}

/// Walk the multipart stream: text parts fill the field set, file parts are
/// written to the temp store as they arrive.
async fn collect_parts(
    state: &AppState,
    mut multipart: Multipart,
    staged: &mut Vec<StagedUpload>,
) -> Result<SubmissionFields, AppError> {
    let mut fields = SubmissionFields::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
    {
        let Some(name) = field.name().map(|s| s.to_string()) else {
            continue;
        };

        if let Some(slot) = FILE_SLOTS.iter().copied().find(|s| *s == name) {
            if staged.iter().any(|u| u.slot == slot) {
                return Err(AppError::InvalidInput(format!(
                    "At most one {} file is allowed",
                    slot
                )));
            }

            let original_filename = field
                .file_name()
                .unwrap_or("attachment")
                .to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::InvalidInput(format!("Failed to read file data: {}", e)))?;

            let file = state
                .temp_store
                .store(&original_filename, &data)
                .await
                .map_err(|e| AppError::Storage(e.to_string()))?;

            staged.push(StagedUpload {
                slot,
                file,
                content_type,
            });
        } else {
            let value = field.text().await.map_err(|e| {
                AppError::InvalidInput(format!("Failed to read field '{}': {}", name, e))
            })?;
            if !fields.set(&name, value) {
                tracing::debug!(field = %name, "Ignoring unknown form field");
            }
        }
    }

    Ok(fields)
}

async fn load_attachments(
    state: &AppState,
    staged: &[StagedUpload],
) -> Result<Vec<MailAttachment>, AppError> {
    let mut attachments = Vec::with_capacity(staged.len());
    for upload in staged {
        let data = state
            .temp_store
            .read(&upload.file)
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;
        attachments.push(MailAttachment {
            filename: upload.file.original_filename.clone(),
            content_type: upload.content_type.clone(),
            data,
        });
    }
    Ok(attachments)
}

/// Delete every staged file; failures are logged, never surfaced.
async fn release_staged(store: &TempStore, staged: &[StagedUpload]) {
    for upload in staged {
        if let Err(e) = store.delete(&upload.file).await {
            tracing::warn!(
                path = %upload.file.path.display(),
                error = %e,
                "Failed to delete staged upload"
            );
        }
    }
}

/// A booking is only persisted for a well-formed owner identifier; anything
/// else leaves the submission unpersisted.
pub fn parse_owner_id(raw: Option<&str>) -> Option<Uuid> {
    raw.and_then(|s| Uuid::parse_str(s.trim()).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_owner_id_skips_persistence() {
        assert_eq!(parse_owner_id(None), None);
    }

    #[test]
    fn malformed_owner_id_skips_persistence() {
        assert_eq!(parse_owner_id(Some("")), None);
        assert_eq!(parse_owner_id(Some("not-a-uuid")), None);
        assert_eq!(parse_owner_id(Some("1234")), None);
    }

    #[test]
    fn well_formed_owner_id_is_accepted() {
        let id = Uuid::new_v4();
        assert_eq!(parse_owner_id(Some(&id.to_string())), Some(id));
        // Surrounding whitespace from sloppy clients is tolerated.
        assert_eq!(parse_owner_id(Some(&format!("  {}  ", id))), Some(id));
    }
}
