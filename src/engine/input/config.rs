// Key binding table

use super::action::{default_bindings, Action, InputSource};
use std::collections::HashMap;

/// Maps input sources (keys) to game actions
#[derive(Debug, Clone)]
pub struct InputConfig {
    bindings: HashMap<InputSource, Action>,
}

impl InputConfig {
    /// Bind an input source to an action, replacing any previous binding
    pub fn bind(&mut self, source: InputSource, action: Action) {
        self.bindings.insert(source, action);
    }

    /// Get the action bound to an input source
    pub fn get_action(&self, source: InputSource) -> Option<Action> {
        self.bindings.get(&source).copied()
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        let mut config = Self {
            bindings: HashMap::new(),
        };
        for (source, action) in default_bindings() {
            config.bind(source, action);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::KeyCode;

    #[test]
    fn test_default_config() {
        let config = InputConfig::default();
        assert_eq!(
            config.get_action(InputSource::key(KeyCode::ArrowUp)),
            Some(Action::MoveUp)
        );
        assert_eq!(
            config.get_action(InputSource::key(KeyCode::NumpadEnter)),
            Some(Action::Next)
        );
        assert_eq!(
            config.get_action(InputSource::key(KeyCode::Escape)),
            Some(Action::Quit)
        );
        assert_eq!(config.get_action(InputSource::key(KeyCode::KeyH)), None);
    }

    #[test]
    fn test_rebind_source() {
        let mut config = InputConfig::default();
        let source = InputSource::key(KeyCode::Space);

        config.bind(source, Action::Next);

        assert_eq!(config.get_action(source), Some(Action::Next));
    }
}
