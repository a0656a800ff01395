use std::io;
use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Text-to-speech output
#[async_trait::async_trait]
pub trait Speaker: Send + Sync {
    async fn speak(&self, text: &str) -> Result<(), SpeechError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("Nothing to speak")]
    EmptyText,

    #[error("No audio player configured")]
    NoPlayer,

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Player error: {0}")]
    PlayerError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

/// Fetches speech audio over HTTP and pipes it into an external player
pub struct RemoteTts {
    client: reqwest::Client,
    url: String,
    voice: String,
    player: Vec<String>,
}

impl RemoteTts {
    pub fn new(url: String, voice: String, player: Vec<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
            voice,
            player,
        }
    }

    /// Query string of the TTS request
    pub fn query_params(&self, text: &str) -> [(&'static str, String); 4] {
        [
            ("ie", "UTF-8".to_string()),
            ("tl", self.voice.clone()),
            ("client", "tw-ob".to_string()),
            ("q", text.to_string()),
        ]
    }

    async fn fetch(&self, text: &str) -> Result<Vec<u8>, SpeechError> {
        let response = self
            .client
            .get(&self.url)
            .query(&self.query_params(text))
            .send()
            .await?
            .error_for_status()?;

        let audio = response.bytes().await?;
        tracing::debug!("Fetched {} bytes of speech audio", audio.len());
        Ok(audio.to_vec())
    }

    async fn play(&self, audio: &[u8]) -> Result<(), SpeechError> {
        let (program, args) = self.player.split_first().ok_or(SpeechError::NoPlayer)?;

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(audio).await?;
        }

        let status = child.wait().await?;
        if !status.success() {
            return Err(SpeechError::PlayerError(format!("{program} exited with {status}")));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl Speaker for RemoteTts {
    async fn speak(&self, text: &str) -> Result<(), SpeechError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SpeechError::EmptyText);
        }
        if self.player.is_empty() {
            return Err(SpeechError::NoPlayer);
        }

        tracing::info!("Speaking '{}'", text);
        let audio = self.fetch(text).await?;
        self.play(&audio).await
    }
}
