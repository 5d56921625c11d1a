/// Yes/no prompt shown before destructive actions.
pub trait ConfirmationGate {
    /// Returns true to proceed.
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Gate that accepts every prompt.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysConfirm;

impl ConfirmationGate for AlwaysConfirm {
    fn confirm(&mut self, _prompt: &str) -> bool {
        true
    }
}

impl<F> ConfirmationGate for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_gate_sees_prompt() {
        let mut prompts = Vec::new();
        let mut gate = |prompt: &str| {
            prompts.push(prompt.to_string());
            false
        };

        assert!(!gate.confirm("Delete?"));
        assert_eq!(prompts, vec!["Delete?".to_string()]);
    }

    #[test]
    fn test_always_confirm() {
        assert!(AlwaysConfirm.confirm("Delete?"));
    }
}
