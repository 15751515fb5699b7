//! Email service for dispatching form-submission notifications via SMTP.

use lettre::message::header::ContentType;
use lettre::message::{Attachment, Body, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::sync::Arc;
use tracing::info;

use stagebook_core::models::SubmissionFields;
use stagebook_core::{AppError, Config};

/// One attachment loaded from the temp store, ready to send.
#[derive(Debug, Clone)]
pub struct MailAttachment {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// SMTP mailer for submission notifications, addressed to the administrator
/// configured at startup.
#[derive(Clone)]
pub struct Mailer {
    mailer: Arc<AsyncSmtpTransport<Tokio1Executor>>,
    from: String,
    admin: String,
}

impl Mailer {
    pub fn from_config(config: &Config) -> Result<Self, anyhow::Error> {
        let credentials =
            Credentials::new(config.smtp_user.clone(), config.smtp_password.clone());

        let mailer = if config.smtp_tls {
            let b = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
                .port(config.smtp_port)
                .credentials(credentials);
            tracing::info!(
                host = %config.smtp_host,
                port = config.smtp_port,
                "Mailer initialized (SMTP with STARTTLS)"
            );
            b.build()
        } else {
            let b = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(config.smtp_host.as_str())
                .port(config.smtp_port)
                .credentials(credentials);
            tracing::info!(
                host = %config.smtp_host,
                port = config.smtp_port,
                "Mailer initialized (SMTP, no TLS)"
            );
            b.build()
        };

        Ok(Self {
            mailer: Arc::new(mailer),
            from: config.smtp_from.clone(),
            admin: config.admin_email.clone(),
        })
    }

    /// Send one submission notification. Single attempt; the upstream cause
    /// stays in the server log.
    pub async fn send_submission(
        &self,
        fields: &SubmissionFields,
        attachments: Vec<MailAttachment>,
    ) -> Result<(), AppError> {
        let attachment_count = attachments.len();
        let email = build_submission_email(&self.from, &self.admin, fields, attachments)
            .map_err(|e| AppError::Mail(format!("Failed to build message: {}", e)))?;

        self.mailer.send(email).await.map_err(|e| {
            tracing::error!(error = %e, "Submission notification failed");
            AppError::Mail(e.to_string())
        })?;

        info!(
            to = %self.admin,
            attachments = attachment_count,
            "Submission notification sent"
        );
        Ok(())
    }
}

/// Subject line; falls back to "Unknown" when no person name was submitted.
pub fn submission_subject(fields: &SubmissionFields) -> String {
    let person = fields
        .person_name
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or("Unknown");
    format!("New Form Submission from {}", person)
}

fn line(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

/// Plain-text body interpolating every submitted field into a fixed template.
/// Missing fields render as empty.
pub fn submission_body(fields: &SubmissionFields) -> String {
    format!(
        "Date: {}\n\
         Time: {}\n\
         Shooting Days: {}\n\
         Pre-setup Days: {}\n\
         Dismantal Days: {}\n\
         Note: {}\n\
         \n\
         Production Name: {}\n\
         Person Name: {}\n\
         Phone: {}\n\
         Email: {}\n\
         GST: {}\n\
         Gov ID: {}\n",
        line(&fields.date),
        line(&fields.time),
        line(&fields.shooting_days),
        line(&fields.pre_setup_days),
        line(&fields.dismantal_days),
        line(&fields.additional_note),
        line(&fields.production_name),
        line(&fields.person_name),
        line(&fields.phone_number),
        line(&fields.email_address),
        line(&fields.gst),
        line(&fields.gov_id),
    )
}

fn build_submission_email(
    from: &str,
    to: &str,
    fields: &SubmissionFields,
    attachments: Vec<MailAttachment>,
) -> Result<Message, anyhow::Error> {
    let from_addr: Mailbox = from
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid sender address: {}", e))?;
    let to_addr: Mailbox = to
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid recipient address: {}", e))?;

    let builder = Message::builder()
        .from(from_addr)
        .to(to_addr)
        .subject(submission_subject(fields));

    let body = submission_body(fields);

    let email = if attachments.is_empty() {
        builder.header(ContentType::TEXT_PLAIN).body(body)?
    } else {
        let mut multipart = MultiPart::mixed().singlepart(
            SinglePart::builder()
                .header(ContentType::TEXT_PLAIN)
                .body(body),
        );
        for attachment in attachments {
            let content_type = ContentType::parse(&attachment.content_type)
                .or_else(|_| ContentType::parse("application/octet-stream"))
                .map_err(|e| anyhow::anyhow!("Invalid attachment content type: {}", e))?;
            multipart = multipart.singlepart(
                Attachment::new(attachment.filename)
                    .body(Body::new(attachment.data), content_type),
            );
        }
        builder.multipart(multipart)?
    };

    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields_with(person_name: Option<&str>) -> SubmissionFields {
        let mut fields = SubmissionFields::default();
        fields.date = Some("2024-01-01".to_string());
        fields.production_name = Some("Midnight Run".to_string());
        fields.person_name = person_name.map(str::to_string);
        fields
    }

    #[test]
    fn subject_uses_person_name() {
        let fields = fields_with(Some("Alice"));
        assert_eq!(
            submission_subject(&fields),
            "New Form Submission from Alice"
        );
    }

    #[test]
    fn subject_falls_back_to_unknown() {
        assert_eq!(
            submission_subject(&fields_with(None)),
            "New Form Submission from Unknown"
        );
        assert_eq!(
            submission_subject(&fields_with(Some(""))),
            "New Form Submission from Unknown"
        );
    }

    #[test]
    fn body_renders_submitted_and_missing_fields() {
        let fields = fields_with(Some("Alice"));
        let body = submission_body(&fields);
        assert!(body.contains("Date: 2024-01-01"));
        assert!(body.contains("Production Name: Midnight Run"));
        assert!(body.contains("Person Name: Alice"));
        // Missing fields render as empty, not as a placeholder.
        assert!(body.contains("Phone: \n"));
        assert!(body.contains("GST: \n"));
    }

    #[test]
    fn message_without_attachments_is_plain_text() {
        let email = build_submission_email(
            "notifier@example.com",
            "admin@example.com",
            &fields_with(Some("Alice")),
            Vec::new(),
        )
        .unwrap();
        let raw = String::from_utf8_lossy(&email.formatted()).to_string();
        assert!(raw.contains("Subject: New Form Submission from Alice"));
        assert!(!raw.contains("multipart/mixed"));
        assert!(!raw.contains("Content-Disposition: attachment"));
    }

    #[test]
    fn message_carries_both_attachments() {
        let attachments = vec![
            MailAttachment {
                filename: "gst.pdf".to_string(),
                content_type: "application/pdf".to_string(),
                data: b"pdf bytes".to_vec(),
            },
            MailAttachment {
                filename: "id.png".to_string(),
                content_type: "image/png".to_string(),
                data: b"png bytes".to_vec(),
            },
        ];
        let email = build_submission_email(
            "notifier@example.com",
            "admin@example.com",
            &fields_with(Some("Alice")),
            attachments,
        )
        .unwrap();
        let raw = String::from_utf8_lossy(&email.formatted()).to_string();
        assert!(raw.contains("multipart/mixed"));
        assert!(raw.contains("gst.pdf"));
        assert!(raw.contains("id.png"));
    }

    #[test]
    fn unparseable_attachment_content_type_falls_back() {
        let attachments = vec![MailAttachment {
            filename: "blob".to_string(),
            content_type: "not a mime type".to_string(),
            data: vec![0u8; 4],
        }];
        let email = build_submission_email(
            "notifier@example.com",
            "admin@example.com",
            &SubmissionFields::default(),
            attachments,
        )
        .unwrap();
        let raw = String::from_utf8_lossy(&email.formatted()).to_string();
        assert!(raw.contains("application/octet-stream"));
    }
}
