//! Telegram Bot API client for progress and job notifications

use crate::error::{NovaError, Result};
use crate::output::report::CareerReport;
use crate::processing::ranking::JobMatch;
use crate::processing::roadmap::format_rate;
use log::{debug, info, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const MAX_DIGEST_ACTIONS: usize = 3;

/// The four message kinds the bot sends
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    DailyDigest {
        match_score: u8,
        improvement: i32,
        actions: Vec<String>,
        new_jobs: usize,
        dashboard_url: Option<String>,
    },
    RoadmapUpdate {
        milestone_title: String,
        score_increase: u8,
        next_steps: Vec<String>,
    },
    JobAlert {
        job_title: String,
        company_name: String,
        salary_min: f64,
        salary_max: f64,
        location: String,
        match_score: u8,
        match_reason: Option<String>,
        application_url: String,
    },
    MilestoneCompleted {
        milestone_title: String,
        score_increase: u8,
        current_score: u8,
        next_milestone: String,
    },
}

fn numbered(items: &[String], empty: &str) -> String {
    if items.is_empty() {
        return empty.to_string();
    }
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {}", i + 1, item))
        .collect::<Vec<_>>()
        .join("\n")
}

impl Notification {
    /// Digest of a finished analysis: score, first roadmap actions and job count
    pub fn daily_digest(report: &CareerReport) -> Self {
        let mut actions: Vec<String> = report
            .roadmap
            .phases
            .iter()
            .flat_map(|phase| phase.actions.iter().map(|a| a.action.clone()))
            .take(MAX_DIGEST_ACTIONS)
            .collect();
        if actions.is_empty() {
            actions = report
                .roadmap
                .phases
                .iter()
                .flat_map(|phase| phase.goals.iter().cloned())
                .take(MAX_DIGEST_ACTIONS)
                .collect();
        }

        Notification::DailyDigest {
            match_score: report.analysis.match_score,
            improvement: 0,
            actions,
            new_jobs: report.job_matches.len(),
            dashboard_url: None,
        }
    }

    pub fn job_alert(job: &JobMatch) -> Self {
        Notification::JobAlert {
            job_title: job.job_title.clone(),
            company_name: job.company_name.clone(),
            salary_min: job.salary_min,
            salary_max: job.salary_max,
            location: job.location.clone(),
            match_score: job.match_score,
            match_reason: Some(job.match_reason.clone()).filter(|r| !r.is_empty()),
            application_url: job.application_url.clone(),
        }
    }

    /// Alert for the best-ranked job in a report, if there is one
    pub fn top_job_alert(report: &CareerReport) -> Option<Self> {
        report.job_matches.first().map(Self::job_alert)
    }

    /// Render as Telegram Markdown
    pub fn format_message(&self) -> String {
        match self {
            Notification::DailyDigest {
                match_score,
                improvement,
                actions,
                new_jobs,
                dashboard_url,
            } => format!(
                "🚀 *NOVA Daily Digest*\n\n\
                 📊 *Match Score:* {}%\n\
                 📈 *Weekly Change:* {}{}%\n\n\
                 🎯 *Priority Actions Today:*\n{}\n\n\
                 💼 *New Job Matches:* {} roles found\n\
                 🔗 [View Dashboard]({})",
                match_score,
                if *improvement > 0 { "+" } else { "" },
                improvement,
                numbered(actions, "No actions available"),
                new_jobs,
                dashboard_url.as_deref().unwrap_or("#")
            ),
            Notification::RoadmapUpdate {
                milestone_title,
                score_increase,
                next_steps,
            } => format!(
                "🛣️ *Roadmap Progress Update*\n\n\
                 ✅ *Completed:* {}\n\
                 📊 *Score Impact:* +{}%\n\n\
                 🎯 *Next Steps:*\n{}\n\n\
                 Keep up the great work! 💪",
                milestone_title,
                score_increase,
                numbered(next_steps, "No next steps available")
            ),
            Notification::JobAlert {
                job_title,
                company_name,
                salary_min,
                salary_max,
                location,
                match_score,
                match_reason,
                application_url,
            } => format!(
                "💼 *New High-Match Job Alert!*\n\n\
                 🏢 *{}* at *{}*\n\
                 💰 ${}-{}/hour\n\
                 📍 {}\n\
                 🎯 {}% match\n\n\
                 {}\n\n\
                 🔗 [Apply Now]({})",
                job_title,
                company_name,
                format_rate(*salary_min),
                format_rate(*salary_max),
                location,
                match_score,
                match_reason.as_deref().unwrap_or(""),
                application_url
            ),
            Notification::MilestoneCompleted {
                milestone_title,
                score_increase,
                current_score,
                next_milestone,
            } => format!(
                "🎉 *Milestone Achieved!*\n\n\
                 ✅ {}\n\
                 📊 Your match score increased by {}%\n\n\
                 🎯 *Current Score:* {}%\n\
                 🚀 *Next Milestone:* {}\n\n\
                 Great progress! Keep it up! 💪",
                milestone_title, score_increase, current_score, next_milestone
            ),
        }
    }
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: String,
    parse_mode: &'static str,
    disable_web_page_preview: bool,
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BotUser {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Update {
    #[serde(default)]
    message: Option<UpdateMessage>,
}

#[derive(Debug, Deserialize)]
struct UpdateMessage {
    #[serde(default)]
    from: Option<BotUser>,
    chat: Chat,
}

#[derive(Debug, Deserialize)]
struct Chat {
    id: i64,
}

pub struct TelegramNotifier {
    client: Client,
    bot_url: String,
}

impl TelegramNotifier {
    pub fn new(api_url: &str, bot_token: &str, timeout_secs: u64) -> Result<Self> {
        if bot_token.trim().is_empty() {
            return Err(NovaError::Notification(
                "Telegram bot token not found in environment variables".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            bot_url: format!("{}/bot{}", api_url.trim_end_matches('/'), bot_token.trim()),
        })
    }

    /// Post a message; returns the API's `ok` flag
    pub async fn send(&self, chat_id: &str, notification: &Notification) -> Result<bool> {
        let request = SendMessageRequest {
            chat_id,
            text: notification.format_message(),
            parse_mode: "Markdown",
            disable_web_page_preview: true,
        };

        let response: ApiResponse<serde_json::Value> = self
            .client
            .post(format!("{}/sendMessage", self.bot_url))
            .json(&request)
            .send()
            .await?
            .json()
            .await?;

        if response.ok {
            info!("Telegram message sent to chat {}", chat_id);
        } else {
            warn!(
                "Telegram rejected message: {}",
                response.description.as_deref().unwrap_or("no description")
            );
        }
        Ok(response.ok)
    }

    /// Check the token with `getMe`
    pub async fn verify(&self) -> Result<Option<BotUser>> {
        let response: ApiResponse<BotUser> = self
            .client
            .get(format!("{}/getMe", self.bot_url))
            .send()
            .await?
            .json()
            .await?;

        debug!("getMe ok={}", response.ok);
        Ok(if response.ok { response.result } else { None })
    }

    /// Find the chat id of a user who has messaged the bot
    pub async fn chat_id_for(&self, username: &str) -> Result<Option<String>> {
        let response: ApiResponse<Vec<Update>> = self
            .client
            .get(format!("{}/getUpdates", self.bot_url))
            .send()
            .await?
            .json()
            .await?;

        if !response.ok {
            return Ok(None);
        }

        Ok(find_chat_id(response.result.unwrap_or_default(), username))
    }
}

fn find_chat_id(updates: Vec<Update>, username: &str) -> Option<String> {
    let username = username.trim_start_matches('@');
    updates
        .into_iter()
        .filter_map(|update| update.message)
        .find(|message| {
            message
                .from
                .as_ref()
                .and_then(|from| from.username.as_deref())
                .is_some_and(|name| name == username)
        })
        .map(|message| message.chat.id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::report::tests::sample_report;

    #[test]
    fn test_empty_token_is_rejected() {
        let result = TelegramNotifier::new("https://api.telegram.org", "  ", 5);
        assert!(matches!(result, Err(NovaError::Notification(_))));
    }

    #[test]
    fn test_digest_message() {
        let message = Notification::DailyDigest {
            match_score: 68,
            improvement: 4,
            actions: vec!["Finish Docker course".to_string(), "Update LinkedIn".to_string()],
            new_jobs: 3,
            dashboard_url: None,
        }
        .format_message();

        assert!(message.starts_with("🚀 *NOVA Daily Digest*"));
        assert!(message.contains("📊 *Match Score:* 68%"));
        assert!(message.contains("📈 *Weekly Change:* +4%"));
        assert!(message.contains("1. Finish Docker course\n2. Update LinkedIn"));
        assert!(message.contains("💼 *New Job Matches:* 3 roles found"));
        assert!(message.ends_with("[View Dashboard](#)"));
    }

    #[test]
    fn test_empty_lists_have_placeholders() {
        let digest = Notification::DailyDigest {
            match_score: 40,
            improvement: -2,
            actions: vec![],
            new_jobs: 0,
            dashboard_url: Some("https://nova.example/dash".to_string()),
        }
        .format_message();
        assert!(digest.contains("*Weekly Change:* -2%"));
        assert!(digest.contains("No actions available"));

        let update = Notification::RoadmapUpdate {
            milestone_title: "Docker certified".to_string(),
            score_increase: 8,
            next_steps: vec![],
        }
        .format_message();
        assert!(update.contains("✅ *Completed:* Docker certified"));
        assert!(update.contains("📊 *Score Impact:* +8%"));
        assert!(update.contains("No next steps available"));
    }

    #[test]
    fn test_milestone_message() {
        let message = Notification::MilestoneCompleted {
            milestone_title: "Portfolio launched".to_string(),
            score_increase: 10,
            current_score: 78,
            next_milestone: "First interview".to_string(),
        }
        .format_message();
        assert!(message.contains("📊 Your match score increased by 10%"));
        assert!(message.contains("🎯 *Current Score:* 78%"));
        assert!(message.contains("🚀 *Next Milestone:* First interview"));
    }

    #[test]
    fn test_builders_from_report() {
        let report = sample_report();

        match Notification::daily_digest(&report) {
            Notification::DailyDigest { match_score, actions, new_jobs, .. } => {
                assert_eq!(match_score, 72);
                assert!(!actions.is_empty() && actions.len() <= 3);
                assert_eq!(new_jobs, report.job_matches.len());
            }
            other => panic!("unexpected notification {:?}", other),
        }

        let alert = Notification::top_job_alert(&report).unwrap().format_message();
        let top = &report.job_matches[0];
        assert!(alert.contains(&format!("🏢 *{}* at *{}*", top.job_title, top.company_name)));
        assert!(alert.contains(&format!("🎯 {}% match", top.match_score)));
        assert!(alert.contains("/hour"));
    }

    #[test]
    fn test_rejected_reply_has_no_result() {
        let response: ApiResponse<BotUser> =
            serde_json::from_str(r#"{"ok":false,"description":"Unauthorized"}"#).unwrap();
        assert!(!response.ok);
        assert!(response.result.is_none());
        assert_eq!(response.description.as_deref(), Some("Unauthorized"));

        let response: ApiResponse<BotUser> =
            serde_json::from_str(r#"{"ok":true,"result":{"id":99,"is_bot":true,"username":"nova_bot"}}"#).unwrap();
        let bot = response.result.unwrap();
        assert_eq!(bot.id, 99);
        assert_eq!(bot.username.as_deref(), Some("nova_bot"));
    }

    #[test]
    fn test_find_chat_id() {
        let updates: Vec<Update> = serde_json::from_str(
            r#"[
                {"update_id": 1, "message": {"from": {"id": 5, "username": "someone"}, "chat": {"id": 500}}},
                {"update_id": 2},
                {"update_id": 3, "message": {"from": {"id": 7, "username": "jane"}, "chat": {"id": -700}}}
            ]"#,
        )
        .unwrap();

        assert_eq!(find_chat_id(updates, "@jane"), Some("-700".to_string()));
    }

    #[tokio::test]
    async fn test_unreachable_api_is_network_error() {
        let notifier = TelegramNotifier::new("http://127.0.0.1:9", "123:abc", 2).unwrap();
        let result = notifier.send("1", &Notification::job_alert(&sample_report().job_matches[0])).await;
        assert!(matches!(result, Err(NovaError::Network(_))));
    }
}
