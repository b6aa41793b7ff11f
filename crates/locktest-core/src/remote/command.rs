use std::borrow::Cow;
use std::fmt;

/// One word of a remote command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Arg {
    /// Shell-quoted when rendered.
    Quoted(String),
    /// Passed to the remote shell verbatim (`&&`, `|`, ...).
    Raw(String),
}

/// Command line executed by the remote shell.
///
/// ```
/// use locktest_core::RemoteCommand;
///
/// let cmd = RemoteCommand::program("mkdir")
///     .arg("/tmp/x")
///     .and()
///     .arg("rmdir")
///     .arg("/tmp/x");
/// assert_eq!(cmd.to_shell(), "mkdir /tmp/x && rmdir /tmp/x");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteCommand {
    args: Vec<Arg>,
    stream: Option<String>,
    check: bool,
}

impl RemoteCommand {
    pub fn new() -> Self {
        Self {
            args: Vec::new(),
            stream: None,
            check: true,
        }
    }

    pub fn program(program: impl Into<String>) -> Self {
        Self::new().arg(program)
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(Arg::Quoted(arg.into()));
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args
            .extend(args.into_iter().map(|a| Arg::Quoted(a.into())));
        self
    }

    pub fn raw(mut self, raw: impl Into<String>) -> Self {
        self.args.push(Arg::Raw(raw.into()));
        self
    }

    /// Append a raw `&&`.
    pub fn and(self) -> Self {
        self.raw("&&")
    }

    /// Log stream label for the command's output.
    pub fn with_stream(mut self, stream: impl Into<String>) -> Self {
        self.stream = Some(stream.into());
        self
    }

    /// Whether a non-zero exit of a blocking run is an error (default `true`).
    pub fn with_check(mut self, check: bool) -> Self {
        self.check = check;
        self
    }

    #[inline]
    pub fn stream(&self) -> Option<&str> {
        self.stream.as_deref()
    }

    #[inline]
    pub fn check(&self) -> bool {
        self.check
    }

    #[inline]
    pub fn as_args(&self) -> &[Arg] {
        &self.args
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Render as a single line for `sh -c` / `ssh host -- ...`.
    pub fn to_shell(&self) -> String {
        self.args
            .iter()
            .map(|a| match a {
                Arg::Quoted(s) => quote(s),
                Arg::Raw(s) => Cow::Borrowed(s.as_str()),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for RemoteCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RemoteCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_shell())
    }
}

fn is_shell_safe(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(c, '_' | '-' | '.' | '/' | ':' | '=' | '@' | '%' | '+' | ',')
}

fn quote(s: &str) -> Cow<'_, str> {
    if !s.is_empty() && s.chars().all(is_shell_safe) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        if ch == '\'' {
            out.push_str("'\"'\"'");
        } else {
            out.push(ch);
        }
    }
    out.push('\'');
    Cow::Owned(out)
}
