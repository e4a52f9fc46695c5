use crate::core::config::data::{path_display, Config};

impl Config {
    pub fn print_all(&self) {
        println!("Current configuration:");
        println!("  api-key: {}", self.masked_api_key());
        println!("  api-url: {}", self.api_url);
        println!("  model: {}", self.model);
        println!("  temperature: {}", self.temperature);
        match self.max_tokens {
            Some(max_tokens) => println!("  max-tokens: {max_tokens}"),
            None => println!("  max-tokens: (unset)"),
        }
        match &self.system_prompt {
            Some(_) => println!("  system-prompt: custom"),
            None => println!("  system-prompt: built-in chef persona"),
        }
        match &self.history_dir {
            Some(dir) => println!("  history-dir: {}", path_display(dir)),
            None => println!("  history-dir: (platform default)"),
        }
        let on_off = |flag: bool| if flag { "on" } else { "off" };
        println!("  logging: {}", on_off(self.enable_logging));
        println!("  log-api-requests: {}", on_off(self.log_api_requests));
        println!("  log-api-responses: {}", on_off(self.log_api_responses));
    }
}
