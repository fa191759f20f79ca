use crate::model::channel::MessageReference;

use serde::{Deserialize, Serialize};

/// [`CreateMessage`] is used to construct a new message.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CreateMessage {
    pub(crate) content: Option<String>,
    pub(crate) reference_message: Option<MessageReference>,
    pub(crate) embed: Option<CreateEmbed>,
}

impl CreateMessage {
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce(&mut Self),
    {
        let mut builder = Self::default();
        f(&mut builder);
        builder
    }

    /// Set the content of the message.
    pub fn content<T>(&mut self, content: T) -> &mut Self
    where
        T: ToString,
    {
        self.content = Some(content.to_string());
        self
    }

    /// Set the message this message replies to.
    pub fn reference_message<T>(&mut self, reference: T) -> &mut Self
    where
        T: Into<MessageReference>,
    {
        self.reference_message = Some(reference.into());
        self
    }

    pub fn embed<F>(&mut self, f: F) -> &mut Self
    where
        F: FnOnce(&mut CreateEmbed),
    {
        self.embed = Some(CreateEmbed::new(f));
        self
    }

    pub fn get_content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn get_reference_message(&self) -> Option<&MessageReference> {
        self.reference_message.as_ref()
    }

    pub fn get_embed(&self) -> Option<&CreateEmbed> {
        self.embed.as_ref()
    }
}

impl<T> From<T> for CreateMessage
where
    T: AsRef<str>,
{
    fn from(t: T) -> Self {
        let mut builder = Self::default();
        builder.content(t.as_ref());
        builder
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CreateEmbed {
    pub(crate) title: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) color: Option<u32>,
}

impl CreateEmbed {
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce(&mut Self),
    {
        let mut builder = Self::default();
        f(&mut builder);
        builder
    }

    pub fn title<T>(&mut self, title: T) -> &mut Self
    where
        T: ToString,
    {
        self.title = Some(title.to_string());
        self
    }

    pub fn description<T>(&mut self, description: T) -> &mut Self
    where
        T: ToString,
    {
        self.description = Some(description.to_string());
        self
    }

    pub fn color<T>(&mut self, color: T) -> &mut Self
    where
        T: Into<u32>,
    {
        self.color = Some(color.into());
        self
    }
}
