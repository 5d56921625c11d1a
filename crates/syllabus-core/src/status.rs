/// Transient feedback shown next to the syllabus forms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusState {
    /// An action is waiting on the server.
    pub busy: bool,
    pub error_text: Option<String>,
    pub success_text: Option<String>,
}

impl StatusState {
    /// True when nothing is in flight and no message is showing.
    pub fn is_idle(&self) -> bool {
        !self.busy && self.error_text.is_none() && self.success_text.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        assert!(StatusState::default().is_idle());

        let busy = StatusState {
            busy: true,
            ..Default::default()
        };
        assert!(!busy.is_idle());
    }
}
