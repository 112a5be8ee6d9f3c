use std::pin::Pin;

use async_stream::try_stream;
use confab_core::error::{ChatError, Result};
use confab_core::{ChatStreamProvider, Message, StreamEvent};
use futures_core::stream::Stream;

use crate::api::ChatCompletionRequest;
use crate::client::ChatClient;

impl ChatStreamProvider for ChatClient {
    type Events<'s>
        = Pin<Box<dyn Stream<Item = Result<StreamEvent>> + Send + 's>>
    where
        Self: 's;

    fn stream_chat<'s>(&'s self, messages: &[Message]) -> Self::Events<'s> {
        let request =
            ChatCompletionRequest::new(self.config().model.clone(), messages.to_vec());

        Box::pin(try_stream! {
            use futures_util::StreamExt;

            let stream = self.chat_completion_stream(request);
            futures_util::pin_mut!(stream);

            while let Some(event) = stream.next().await {
                let event = event.map_err(ChatError::from)?;
                yield event;
            }
        })
    }
}
