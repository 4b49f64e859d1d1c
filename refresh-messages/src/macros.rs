/// Renders a [`Messages`](crate::Messages) template.
///
/// ```
/// use refresh_messages::{msg, MESSAGES};
///
/// let line = msg!(MESSAGES.assemble_init, tool = "terraform");
/// assert_eq!(line, "=> Running terraform init");
/// ```
#[macro_export]
macro_rules! msg {
    ($template:expr $(,)?) => {
        $crate::builder::MessageBuilder::new($template).build()
    };
    ($template:expr, $($key:ident = $value:expr),+ $(,)?) => {
        $crate::builder::MessageBuilder::new($template)
            $(.var(stringify!($key), $value))+
            .build()
    };
}
