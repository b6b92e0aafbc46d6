use anyhow::{Context, Result, bail};
use log::debug;
use std::fmt;
use std::io::ErrorKind;
use std::process::{Command, Stdio};

/// 單次外部工具呼叫的結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscodeOutcome {
    Success,
    /// 非零結束；被訊號終止時沒有結束碼
    ToolFailure {
        exit_code: Option<i32>,
        stderr: String,
    },
    /// 找不到執行檔
    ToolMissing,
    /// 其他啟動失敗（權限不足等）
    LaunchFailed(String),
    /// 收到中斷信號，未執行
    Skipped,
}

impl TranscodeOutcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl fmt::Display for TranscodeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "成功"),
            Self::ToolFailure {
                exit_code: Some(code),
                stderr,
            } if !stderr.is_empty() => write!(f, "結束碼 {code}: {stderr}"),
            Self::ToolFailure {
                exit_code: Some(code),
                ..
            } => write!(f, "結束碼 {code}"),
            Self::ToolFailure {
                exit_code: None, ..
            } => write!(f, "程序被訊號終止"),
            Self::ToolMissing => write!(f, "找不到外部工具"),
            Self::LaunchFailed(reason) => write!(f, "無法啟動外部工具: {reason}"),
            Self::Skipped => write!(f, "已略過"),
        }
    }
}

/// 執行外部工具並等待結束，stdout/stderr 都會被擷取不直接輸出
pub fn run_transcoder(mut command: Command) -> TranscodeOutcome {
    debug!("執行: {command:?}");

    let output = match command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
    {
        Ok(output) => output,
        Err(e) if e.kind() == ErrorKind::NotFound => return TranscodeOutcome::ToolMissing,
        Err(e) => return TranscodeOutcome::LaunchFailed(e.to_string()),
    };

    if output.status.success() {
        TranscodeOutcome::Success
    } else {
        TranscodeOutcome::ToolFailure {
            exit_code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }
}

/// 確認外部工具可執行（`<tool> -version`）
pub fn ensure_tool_available(tool: &str) -> Result<()> {
    let status = match Command::new(tool)
        .arg("-version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
    {
        Ok(status) => status,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            bail!("找不到 {tool}，請確認已安裝並加入 PATH")
        }
        Err(e) => return Err(e).with_context(|| format!("無法執行 {tool}")),
    };

    debug!("{tool} -version 結束狀態: {status}");
    Ok(())
}
