use serenity::all::{ResolvedOption, ResolvedValue, User};

#[derive(Debug, Clone)]
pub struct Options<'a> {
    pub options: Vec<ResolvedOption<'a>>,
}

impl Options<'_> {
    pub fn get_user(&self, name: &str) -> Option<User> {
        self.options
            .iter()
            .find(|option| option.name == name)
            .and_then(|option| match &option.value {
                ResolvedValue::User(user, _) => Some((*user).clone()),
                _ => None,
            })
    }

    pub fn get_string(&self, name: &str) -> Option<String> {
        self.options
            .iter()
            .find(|option| option.name == name)
            .and_then(|option| match &option.value {
                ResolvedValue::String(string) => Some((*string).to_string()),
                _ => None,
            })
    }
}
