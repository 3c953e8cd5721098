/// Model the service falls back to when the request names none.
pub const DEFAULT_MODEL: &str = "dall-e-2";

/// Everything the user types into the left-hand panel. Lives only on the app
/// struct and dies with it; nothing here is persisted.
#[derive(Clone)]
pub struct FormState {
    pub prompt: String,
    pub endpoint: String,
    pub api_key: String,
    /// Optional model override. Blank means the provider's default
    /// ([`DEFAULT_MODEL`]) and the field is omitted from the request body
    /// entirely.
    pub model: String,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            endpoint: "https://api.openai.com/v1/images/generations".to_string(),
            api_key: String::new(),
            model: String::new(),
        }
    }
}

impl FormState {
    /// Checks the required fields before a request is allowed out the door.
    /// Returns the reason to show the user when something is missing.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.prompt.trim().is_empty() {
            return Err("Please enter a prompt");
        }
        if self.api_key.trim().is_empty() {
            return Err("Please enter your API key");
        }
        if self.endpoint.trim().is_empty() {
            return Err("Please enter the API endpoint");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> FormState {
        FormState {
            prompt: "a lighthouse at dusk".to_string(),
            endpoint: "https://api.openai.com/v1/images/generations".to_string(),
            api_key: "sk-test".to_string(),
            model: String::new(),
        }
    }

    #[test]
    fn accepts_complete_form() {
        assert_eq!(filled().validate(), Ok(()));
    }

    #[test]
    fn rejects_empty_prompt() {
        let mut form = filled();
        form.prompt = String::new();
        assert_eq!(form.validate(), Err("Please enter a prompt"));
    }

    #[test]
    fn rejects_whitespace_only_prompt() {
        let mut form = filled();
        form.prompt = "   \n\t".to_string();
        assert_eq!(form.validate(), Err("Please enter a prompt"));
    }

    #[test]
    fn rejects_missing_api_key() {
        let mut form = filled();
        form.api_key = "  ".to_string();
        assert_eq!(form.validate(), Err("Please enter your API key"));
    }

    #[test]
    fn rejects_missing_endpoint() {
        let mut form = filled();
        form.endpoint = String::new();
        assert_eq!(form.validate(), Err("Please enter the API endpoint"));
    }

    #[test]
    fn prompt_is_checked_before_api_key() {
        let form = FormState {
            prompt: String::new(),
            api_key: String::new(),
            ..filled()
        };
        assert_eq!(form.validate(), Err("Please enter a prompt"));
    }

    #[test]
    fn blank_model_is_valid() {
        let mut form = filled();
        form.model = String::new();
        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn fresh_form_leaves_model_to_the_provider_default() {
        assert!(FormState::default().model.is_empty());
        assert_eq!(DEFAULT_MODEL, "dall-e-2");
    }
}
