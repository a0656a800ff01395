use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_url() -> String {
    "https://translate.google.com/translate_tts".to_string()
}

fn default_voice() -> String {
    "th".to_string()
}

fn default_player() -> Vec<String> {
    vec![
        "mpv".to_string(),
        "--no-video".to_string(),
        "--really-quiet".to_string(),
        "-".to_string(),
    ]
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct SpeechConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Remote text-to-speech endpoint
    #[serde(default = "default_url")]
    pub url: String,
    /// Language code sent as the voice
    #[serde(default = "default_voice")]
    pub voice: String,
    /// Player command, receives the audio on stdin
    #[serde(default = "default_player")]
    pub player: Vec<String>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            url: default_url(),
            voice: default_voice(),
            player: default_player(),
        }
    }
}
