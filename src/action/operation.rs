// Copyright 2025 Lablup Inc. and Jeongkyu Shin
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Operations and the argument vectors they expand to.

use std::path::{Path, PathBuf};

use super::ActionConfig;

const SSH: &str = "ssh";
const SCP: &str = "scp";
const HOST: &str = "host";
const NC: &str = "nc";

const REMOTE_DU: &str = "/usr/bin/du";
const REMOTE_TOP: &str = "/usr/bin/top";
const REMOTE_UPTIME: &str = "/usr/bin/uptime";
const REMOTE_VMSTAT: &str = "/usr/bin/vmstat";

/// Read-only queries that need no user-supplied command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// `host -tcname`
    Cname,
    /// Hardware inventory via dmidecode and ifconfig over ssh
    Dmidecode,
    /// Top 20 disk consumers under a remote path
    DiskUsage(String),
    /// `host`
    Ns,
    Nmap,
    /// TCP reachability of the ssh port with `nc -w1`
    Netcat,
    /// `host -tmx`
    Mx,
    Ping,
    /// `host -tsoa`
    Soa,
    Top,
    Traceroute,
    /// ICMP traceroute, needs sudo
    TracerouteIcmp,
    Uname,
    Uptime,
    Vmstat,
}

/// What to do with every target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Run a command remotely over ssh.
    Exec { command: String },
    /// Copy a local path to every target.
    Upload {
        source: String,
        destination: String,
        recursive: bool,
    },
    /// Copy a remote path from every target.
    ///
    /// With `per_host_dirs`, each target downloads into its own
    /// subdirectory of `destination` so files do not overwrite each other.
    Download {
        source: String,
        destination: PathBuf,
        recursive: bool,
        per_host_dirs: bool,
    },
    Diagnostic(Diagnostic),
    /// Run a local program with the target appended as its last argument.
    LocalCommand { command: String },
}

/// A concrete program and argument vector for one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn to_command(&self) -> tokio::process::Command {
        let mut command = tokio::process::Command::new(&self.program);
        command.args(&self.args);
        command
    }
}

impl Operation {
    /// Short name used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Exec { .. } => "exec",
            Operation::Upload { .. } => "upload",
            Operation::Download { .. } => "download",
            Operation::LocalCommand { .. } => "local",
            Operation::Diagnostic(diagnostic) => match diagnostic {
                Diagnostic::Cname => "cname",
                Diagnostic::Dmidecode => "dmidecode",
                Diagnostic::DiskUsage(_) => "du",
                Diagnostic::Ns => "ns",
                Diagnostic::Nmap => "nmap",
                Diagnostic::Netcat => "nc",
                Diagnostic::Mx => "mx",
                Diagnostic::Ping => "ping",
                Diagnostic::Soa => "soa",
                Diagnostic::Top => "top",
                Diagnostic::Traceroute => "traceroute",
                Diagnostic::TracerouteIcmp => "traceroute-icmp",
                Diagnostic::Uname => "uname",
                Diagnostic::Uptime => "uptime",
                Diagnostic::Vmstat => "vmstat",
            },
        }
    }

    /// Build the invocation for `host`.
    ///
    /// `local_dir` overrides the download destination; it is how per-host
    /// download directories are threaded through.
    pub fn invocation(
        &self,
        config: &ActionConfig,
        host: &str,
        local_dir: Option<&Path>,
    ) -> Invocation {
        match self {
            Operation::Exec { command } => {
                let flags = if config.tty { "tti" } else { "i" };
                ssh(config, flags, host, command)
            }
            Operation::Upload {
                source,
                destination,
                recursive,
            } => {
                let remote = format!("{}:{destination}", remote_host(config, host));
                scp(config, *recursive, source, &remote)
            }
            Operation::Download {
                source,
                destination,
                recursive,
                ..
            } => {
                let remote = format!("{}:{source}", remote_host(config, host));
                let local = local_dir.unwrap_or(destination.as_path());
                scp(config, *recursive, &remote, &local.to_string_lossy())
            }
            Operation::LocalCommand { command } => {
                let mut parts = command.split_whitespace();
                let program = parts.next().unwrap_or_default();
                let args = parts.chain(std::iter::once(host));
                Invocation::new(program, args)
            }
            Operation::Diagnostic(diagnostic) => diagnostic_invocation(diagnostic, config, host),
        }
    }
}

fn diagnostic_invocation(diagnostic: &Diagnostic, config: &ActionConfig, host: &str) -> Invocation {
    match diagnostic {
        Diagnostic::Cname => Invocation::new(HOST, ["-tcname", host]),
        Diagnostic::Mx => Invocation::new(HOST, ["-tmx", host]),
        Diagnostic::Soa => Invocation::new(HOST, ["-tsoa", host]),
        Diagnostic::Ns => Invocation::new(HOST, [host]),
        Diagnostic::Nmap => Invocation::new("nmap", [host]),
        Diagnostic::Netcat => Invocation::new(
            NC,
            ["-w1".to_string(), host.to_string(), config.port.to_string()],
        ),
        Diagnostic::Traceroute => Invocation::new("traceroute", [host]),
        Diagnostic::TracerouteIcmp => Invocation::new("sudo", ["traceroute", "-I", host]),
        Diagnostic::Ping => {
            let wait = if cfg!(target_os = "linux") { "3" } else { "3000" };
            let script = format!("ping -nc1 -s16 -W{wait} {host} |grep from");
            Invocation::new("/bin/sh", ["-c".to_string(), script])
        }
        Diagnostic::Dmidecode => {
            let script = "hostname \
                ; sudo dmidecode -s system-product-name \
                ; sudo dmidecode -s system-serial-number \
                ; /sbin/ifconfig";
            ssh(config, "tti", host, script)
        }
        Diagnostic::DiskUsage(path) => {
            let script = format!("sudo {REMOTE_DU} -amx {path} |sort -rn |head -20");
            ssh(config, "tti", host, &script)
        }
        Diagnostic::Top => {
            let script =
                format!("{REMOTE_TOP} -cbn1 |grep -v '\\[' |grep -v {REMOTE_TOP} |head -20");
            ssh(config, "i", host, &script)
        }
        Diagnostic::Uname => {
            let script = "if [ `uname -s` == Linux ]; then uname -a; \
                          cat /etc/redhat-release; else uname -a; fi";
            ssh(config, "i", host, script)
        }
        Diagnostic::Uptime => ssh(config, "i", host, REMOTE_UPTIME),
        Diagnostic::Vmstat => ssh(config, "i", host, &format!("{REMOTE_VMSTAT} -SM")),
    }
}

/// `-`, `-v`, `-vv` or `-vvv`, ready to have single-letter flags appended.
fn verbosity_prefix(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "-",
        1 => "-v",
        2 => "-vv",
        _ => "-vvv",
    }
}

fn common_options(config: &ActionConfig) -> [String; 3] {
    [
        "-oBatchMode=yes".to_string(),
        "-oStrictHostKeyChecking=no".to_string(),
        format!("-oConnectTimeout={}", config.connect_timeout),
    ]
}

/// `[login@]host` as scp expects it; ssh takes the login through `-l`.
fn remote_host(config: &ActionConfig, host: &str) -> String {
    match &config.login {
        Some(login) => format!("{login}@{host}"),
        None => host.to_string(),
    }
}

fn ssh(config: &ActionConfig, flags: &str, host: &str, remote_command: &str) -> Invocation {
    let mut args = vec![
        format!("{}{flags}", verbosity_prefix(config.verbosity)),
        config.identity.to_string_lossy().into_owned(),
    ];
    if let Some(login) = &config.login {
        args.push("-l".to_string());
        args.push(login.clone());
    }
    args.push("-p".to_string());
    args.push(config.port.to_string());
    args.extend(common_options(config));
    args.push(host.to_string());
    args.push(remote_command.to_string());
    Invocation::new(SSH, args)
}

fn scp(config: &ActionConfig, recursive: bool, from: &str, to: &str) -> Invocation {
    let prefix = verbosity_prefix(config.verbosity);
    let mut args = if recursive {
        vec![format!("{prefix}r"), "-i".to_string()]
    } else {
        vec![format!("{prefix}i")]
    };
    args.push(config.identity.to_string_lossy().into_owned());
    args.push("-P".to_string());
    args.push(config.port.to_string());
    args.extend(common_options(config));
    args.push(from.to_string());
    args.push(to.to_string());
    Invocation::new(SCP, args)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ActionConfig {
        ActionConfig {
            identity: PathBuf::from("/keys/id_rsa"),
            login: None,
            port: 22,
            connect_timeout: 4,
            verbosity: 0,
            tty: false,
        }
    }

    #[test]
    fn test_exec_invocation() {
        let op = Operation::Exec {
            command: "uptime".to_string(),
        };
        let inv = op.invocation(&config(), "web1", None);
        assert_eq!(inv.program, "ssh");
        assert_eq!(
            inv.args,
            vec![
                "-i",
                "/keys/id_rsa",
                "-p",
                "22",
                "-oBatchMode=yes",
                "-oStrictHostKeyChecking=no",
                "-oConnectTimeout=4",
                "web1",
                "uptime"
            ]
        );
    }

    #[test]
    fn test_exec_with_login_tty_and_verbosity() {
        let config = ActionConfig {
            login: Some("admin".to_string()),
            tty: true,
            verbosity: 2,
            port: 2222,
            ..config()
        };
        let op = Operation::Exec {
            command: "id".to_string(),
        };
        let inv = op.invocation(&config, "web1", None);
        assert_eq!(&inv.args[..6], &["-vvtti", "/keys/id_rsa", "-l", "admin", "-p", "2222"]);
        assert_eq!(inv.args.last().map(String::as_str), Some("id"));
    }

    #[test]
    fn test_upload_uses_login_prefix() {
        let config = ActionConfig {
            login: Some("deploy".to_string()),
            ..config()
        };
        let op = Operation::Upload {
            source: "app.tar.gz".to_string(),
            destination: "/tmp".to_string(),
            recursive: false,
        };
        let inv = op.invocation(&config, "web1", None);
        assert_eq!(inv.program, "scp");
        assert_eq!(inv.args[0], "-i");
        assert_eq!(inv.args[1], "/keys/id_rsa");
        assert_eq!(&inv.args[2..4], &["-P", "22"]);
        assert_eq!(
            &inv.args[inv.args.len() - 2..],
            &["app.tar.gz", "deploy@web1:/tmp"]
        );
    }

    #[test]
    fn test_recursive_download_to_host_dir() {
        let op = Operation::Download {
            source: "/var/log".to_string(),
            destination: PathBuf::from("logs"),
            recursive: true,
            per_host_dirs: true,
        };
        let inv = op.invocation(&config(), "web1", Some(Path::new("logs/web1")));
        assert_eq!(&inv.args[..3], &["-r", "-i", "/keys/id_rsa"]);
        assert_eq!(&inv.args[inv.args.len() - 2..], &["web1:/var/log", "logs/web1"]);

        let inv = op.invocation(&config(), "web1", None);
        assert_eq!(inv.args.last().map(String::as_str), Some("logs"));
    }

    #[test]
    fn test_local_command_appends_target() {
        let op = Operation::LocalCommand {
            command: "dig  +short".to_string(),
        };
        let inv = op.invocation(&config(), "example.com", None);
        assert_eq!(inv.program, "dig");
        assert_eq!(inv.args, vec!["+short", "example.com"]);
    }

    #[test]
    fn test_diagnostics() {
        let inv = Operation::Diagnostic(Diagnostic::Mx).invocation(&config(), "example.com", None);
        assert_eq!(inv.program, "host");
        assert_eq!(inv.args, vec!["-tmx", "example.com"]);

        let inv = Operation::Diagnostic(Diagnostic::Netcat).invocation(&config(), "web1", None);
        assert_eq!(inv.args, vec!["-w1", "web1", "22"]);

        let inv = Operation::Diagnostic(Diagnostic::Ping).invocation(&config(), "web1", None);
        assert_eq!(inv.program, "/bin/sh");
        assert!(inv.args[1].starts_with("ping -nc1 -s16 -W3"));
        assert!(inv.args[1].ends_with("web1 |grep from"));

        let inv = Operation::Diagnostic(Diagnostic::DiskUsage("/var".to_string()))
            .invocation(&config(), "web1", None);
        assert_eq!(inv.args[0], "-tti");
        assert_eq!(
            inv.args.last().map(String::as_str),
            Some("sudo /usr/bin/du -amx /var |sort -rn |head -20")
        );

        let inv = Operation::Diagnostic(Diagnostic::Uptime).invocation(&config(), "web1", None);
        assert_eq!(inv.args[0], "-i");
        assert_eq!(inv.args.last().map(String::as_str), Some("/usr/bin/uptime"));
    }

    #[test]
    fn test_operation_names() {
        assert_eq!(
            Operation::Diagnostic(Diagnostic::TracerouteIcmp).name(),
            "traceroute-icmp"
        );
        assert_eq!(
            Operation::Exec {
                command: String::new()
            }
            .name(),
            "exec"
        );
    }
}
