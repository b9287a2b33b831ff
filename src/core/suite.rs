use crate::core::client::CrmClient;
use crate::core::{CheckReport, Storage};
use crate::domain::model::{ChatsResponse, ContactsResponse, DailyStats, MessagesResponse};
use crate::utils::error::Result;
use chrono::Local;

const SHOWN_CONTACTS: usize = 5;
const CHAT_LIMIT: &str = "5";
const MESSAGE_LIMIT: &str = "3";

/// The six smoke checks. Each one issues at most one request, never mutates
/// remote state, and reports a rejection instead of failing the run when the
/// server answers with a non-2xx status.
pub struct SmokeSuite<S: Storage> {
    client: CrmClient,
    storage: S,
}

impl<S: Storage> SmokeSuite<S> {
    pub fn new(client: CrmClient, storage: S) -> Self {
        Self { client, storage }
    }

    pub async fn daily_stats(&self) -> Result<CheckReport> {
        let response = self.client.get("/api/crm/stats/daily", &[]).await?;
        if !response.is_success() {
            return Ok(CheckReport::rejected(
                "daily stats",
                response.status.as_u16(),
                response.text(),
            ));
        }

        let stats: DailyStats = response.json()?;
        Ok(CheckReport::passed(
            "daily stats",
            vec![
                format!("sent today: {}", stats.sent),
                format!("date: {}", stats.date),
            ],
        ))
    }

    pub async fn contacts(&self) -> Result<CheckReport> {
        let response = self.client.get("/api/crm/contacts", &[]).await?;
        if !response.is_success() {
            return Ok(CheckReport::rejected(
                "contacts",
                response.status.as_u16(),
                response.text(),
            ));
        }

        let data: ContactsResponse = response.json()?;
        let mut lines = vec![format!("{} contacts total", data.contacts.len())];
        for (i, contact) in data.contacts.iter().take(SHOWN_CONTACTS).enumerate() {
            lines.push(format!("{}. {}", i + 1, contact.display_name()));
            lines.push(format!("   jid: {}", contact.jid));
            lines.push(format!("   last message: {}", contact.last_message_time()));
        }

        Ok(CheckReport::passed("contacts", lines))
    }

    pub async fn chats(&self) -> Result<CheckReport> {
        let response = self
            .client
            .get("/api/crm/chats", &[("limit", CHAT_LIMIT)])
            .await?;
        if !response.is_success() {
            return Ok(CheckReport::rejected(
                "chats",
                response.status.as_u16(),
                response.text(),
            ));
        }

        let data: ChatsResponse = response.json()?;
        let mut lines = vec![format!("{} chats", data.chats.len())];
        for (i, chat) in data.chats.iter().enumerate() {
            lines.push(format!("{}. {}", i + 1, chat.display_name()));
        }

        Ok(CheckReport::passed("chats", lines))
    }

    pub async fn messages(&self) -> Result<CheckReport> {
        let response = self
            .client
            .get("/api/crm/messages", &[("limit", MESSAGE_LIMIT)])
            .await?;
        if !response.is_success() {
            return Ok(CheckReport::rejected(
                "messages",
                response.status.as_u16(),
                response.text(),
            ));
        }

        let data: MessagesResponse = response.json()?;
        let mut lines = vec![format!("{} messages", data.messages.len())];
        for (i, msg) in data.messages.iter().enumerate() {
            lines.push(format!(
                "{}. [{}] {}: {}",
                i + 1,
                msg.kind(),
                msg.direction(),
                msg.preview()
            ));
            lines.push(format!("   time: {}", msg.timestamp()));
        }

        Ok(CheckReport::passed("messages", lines))
    }

    /// Saves the raw export bytes under a timestamped name. The row count is
    /// advisory; a body the CSV parser chokes on still gets written verbatim.
    pub async fn export_contacts(&self) -> Result<CheckReport> {
        let response = self.client.get("/api/crm/contacts/export", &[]).await?;
        if !response.is_success() {
            return Ok(CheckReport::rejected(
                "contacts export",
                response.status.as_u16(),
                response.text(),
            ));
        }

        let filename = format!("contacts_{}.csv", Local::now().format("%Y%m%d_%H%M%S"));
        self.storage.write_file(&filename, &response.body).await?;
        tracing::debug!("wrote {} bytes to {}", response.body.len(), filename);

        Ok(CheckReport::passed(
            "contacts export",
            vec![
                format!("saved to: {}", filename),
                format!("{} data rows", count_csv_rows(&response.body)),
            ],
        ))
    }

    /// Shows how a send and a broadcast request would look. Never issues
    /// them: this run must not message anyone.
    pub fn send_examples(&self) -> Result<CheckReport> {
        let send_body = serde_json::json!({
            "sessionId": self.client.session_id(),
            "recipient": "85298765432@s.whatsapp.net",
            "text": "Hello from API!"
        });
        let broadcast_body = serde_json::json!({
            "sessionId": self.client.session_id(),
            "recipients": [
                "85298765432@s.whatsapp.net",
                "85287654321@s.whatsapp.net"
            ],
            "text": "Broadcast message body"
        });

        let mut lines = vec![format!(
            "POST {}/api/crm/messages/send",
            self.client.base_url()
        )];
        lines.extend(
            serde_json::to_string_pretty(&send_body)?
                .lines()
                .map(String::from),
        );
        lines.push(format!(
            "POST {}/api/crm/messages/broadcast",
            self.client.base_url()
        ));
        lines.extend(
            serde_json::to_string_pretty(&broadcast_body)?
                .lines()
                .map(String::from),
        );

        Ok(CheckReport::passed("send examples", lines))
    }
}

/// Data rows in the export, header excluded. Unparseable rows are skipped
/// rather than failing the check.
fn count_csv_rows(bytes: &[u8]) -> usize {
    csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(bytes)
        .byte_records()
        .filter_map(|record| record.ok())
        .count()
}
