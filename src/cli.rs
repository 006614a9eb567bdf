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

use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::action::Diagnostic;

/// Synopsis without the leading `usage: `.
pub const USAGE: &str = "\
hostfan [-eqrstuV1] [-v[v[v]]] [-c file] [--cmd] [--cname] [-d file]
               [--dd] [--du path] [-f script.sh] [-h hosts_file] [-g group]
               [-i identity_file] [-l login_name] [--mx] [--nc] [--nmap] [--ns]
               [-o output_file] [-P port] [-p path] [--ping] [--soa]
               [--to timeout] [--top] [--tr] [--tri] [--uname] [--vm]
               [--parallel N] [--deadline seconds] [--config file]
               [command] [[user@]host] ...";

/// What the positional arguments mean for the selected mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Upload,
    Download,
    Diagnostic(Diagnostic),
    LocalCommand,
    Script,
    Exec,
}

impl Mode {
    /// Exec and local-command modes take the command as the first positional.
    pub fn takes_command_argument(&self) -> bool {
        matches!(self, Mode::Exec | Mode::LocalCommand)
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "hostfan",
    version,
    disable_help_flag = true,
    override_usage = USAGE,
    about = "Concurrently run commands, copy files or query diagnostics across many hosts",
    long_about = "hostfan fans one operation out to every target host at once using the system\nssh/scp and local network tools, then prints each host's result as it completes,\nfollowed by a `hosts = N, errors = E` summary. Per-host failures never change\nthe exit status.",
    after_help = "EXAMPLES:\n  Run a command:               hostfan uptime web1 web2 web3\n  Hosts from a file, sorted:   hostfan -s -h hosts.txt 'df -h /'\n  Only failures, quiet:        hostfan -eq -h hosts.txt 'systemctl is-active nginx'\n  Upload a file:               hostfan -c app.conf -p /etc/app/ web1 web2\n  Download into per-host dirs: hostfan -d /var/log/messages -p logs web1 web2\n  Ping a group:                hostfan --ping -g web\n  Log to a file:               hostfan -o run.log -h hosts.txt uname -a"
)]
pub struct Cli {
    #[arg(long, action = ArgAction::Help, help = "Print help")]
    pub help: Option<bool>,

    #[arg(
        short = 'c',
        value_name = "FILE",
        help = "Copy a local file to every host (destination: -p)"
    )]
    pub copy: Option<String>,

    #[arg(
        short = 'd',
        value_name = "FILE",
        help = "Download a remote file from every host (destination: -p)"
    )]
    pub download: Option<String>,

    #[arg(short = 'f', value_name = "SCRIPT", help = "Run a local script on every host")]
    pub script: Option<PathBuf>,

    #[arg(
        short = 'h',
        value_name = "HOSTS_FILE",
        help = "Read hosts from a file, one per line ('#' comments allowed)"
    )]
    pub hosts_file: Option<PathBuf>,

    #[arg(
        short = 'g',
        long = "group",
        value_name = "GROUP",
        help = "Add the hosts of a group from the config file"
    )]
    pub group: Option<String>,

    #[arg(
        short = 'i',
        value_name = "IDENTITY_FILE",
        help = "SSH identity file [default: ~/.ssh/id_rsa]"
    )]
    pub identity: Option<PathBuf>,

    #[arg(short = 'l', value_name = "LOGIN", help = "Login name on the remote hosts")]
    pub login: Option<String>,

    #[arg(
        short = 'o',
        value_name = "OUTPUT_FILE",
        help = "Append full results to a log file framed by START/END lines"
    )]
    pub output: Option<PathBuf>,

    #[arg(short = 'P', value_name = "PORT", help = "SSH port [default: 22]")]
    pub port: Option<u16>,

    #[arg(
        short = 'p',
        value_name = "PATH",
        default_value = ".",
        help = "Remote path for -c, local directory for -d"
    )]
    pub path: String,

    #[arg(long = "to", value_name = "SECONDS", help = "SSH connect timeout [default: 4]")]
    pub timeout: Option<u64>,

    #[arg(short = 'e', help = "Show only hosts that failed")]
    pub errors_only: bool,

    #[arg(short = 'q', help = "Quiet: print only host and [OK]/[ERROR]")]
    pub quiet: bool,

    #[arg(short = 'r', help = "Copy directories recursively")]
    pub recursive: bool,

    #[arg(short = 's', help = "Buffer all results and print them sorted")]
    pub sorted: bool,

    #[arg(short = 't', help = "Force pseudo-tty allocation (script mode runs under sudo)")]
    pub tty: bool,

    #[arg(short = '1', help = "One line per host, no summary")]
    pub one_line: bool,

    #[arg(
        short = 'v',
        action = ArgAction::Count,
        help = "Verbose ssh/scp and logging (-v, -vv, -vvv)"
    )]
    pub verbose: u8,

    #[arg(long = "cmd", help = "Run the command locally with each host as last argument")]
    pub local_command: bool,

    #[arg(long, help = "Query CNAME records")]
    pub cname: bool,

    #[arg(long, help = "Hardware inventory (dmidecode, ifconfig)")]
    pub dd: bool,

    #[arg(long, value_name = "PATH", help = "Top 20 disk consumers under PATH")]
    pub du: Option<String>,

    #[arg(long, help = "Name server lookup")]
    pub ns: bool,

    #[arg(long, help = "Port scan with nmap")]
    pub nmap: bool,

    #[arg(long, help = "Check the SSH port with netcat")]
    pub nc: bool,

    #[arg(long, help = "Query MX records")]
    pub mx: bool,

    #[arg(long, help = "Ping each host once")]
    pub ping: bool,

    #[arg(long, help = "Query SOA records")]
    pub soa: bool,

    #[arg(long, help = "Top 20 processes")]
    pub top: bool,

    #[arg(long, help = "Traceroute")]
    pub tr: bool,

    #[arg(long, help = "ICMP traceroute (sudo)")]
    pub tri: bool,

    #[arg(long, help = "Kernel and release information")]
    pub uname: bool,

    #[arg(short = 'u', help = "Uptime")]
    pub uptime: bool,

    #[arg(long, help = "Virtual memory statistics")]
    pub vm: bool,

    #[arg(long, value_name = "N", help = "Run at most N hosts at once [default: unbounded]")]
    pub parallel: Option<usize>,

    #[arg(
        long,
        value_name = "SECONDS",
        help = "Report hosts still running after SECONDS as failed"
    )]
    pub deadline: Option<u64>,

    #[arg(
        long,
        value_name = "FILE",
        help = "Configuration file [default: ~/.config/hostfan/config.yaml]"
    )]
    pub config: Option<PathBuf>,

    #[arg(trailing_var_arg = true, value_name = "ARGS", help = "[command] [[user@]host] ...")]
    pub args: Vec<String>,
}

impl Cli {
    /// Diagnostic requested by flags, honouring the order in which modes win.
    ///
    /// `--cmd` ranks between `--ping` and `--soa`, so it is handled in
    /// [`Cli::mode`] by splitting the list there.
    fn diagnostic_before_local_command(&self) -> Option<Diagnostic> {
        if self.cname {
            Some(Diagnostic::Cname)
        } else if self.dd {
            Some(Diagnostic::Dmidecode)
        } else if let Some(path) = &self.du {
            Some(Diagnostic::DiskUsage(path.clone()))
        } else if self.ns {
            Some(Diagnostic::Ns)
        } else if self.nmap {
            Some(Diagnostic::Nmap)
        } else if self.nc {
            Some(Diagnostic::Netcat)
        } else if self.mx {
            Some(Diagnostic::Mx)
        } else if self.ping {
            Some(Diagnostic::Ping)
        } else {
            None
        }
    }

    fn diagnostic_after_local_command(&self) -> Option<Diagnostic> {
        if self.soa {
            Some(Diagnostic::Soa)
        } else if self.top {
            Some(Diagnostic::Top)
        } else if self.tr {
            Some(Diagnostic::Traceroute)
        } else if self.tri {
            Some(Diagnostic::TracerouteIcmp)
        } else if self.uname {
            Some(Diagnostic::Uname)
        } else if self.uptime {
            Some(Diagnostic::Uptime)
        } else if self.vm {
            Some(Diagnostic::Vmstat)
        } else {
            None
        }
    }

    /// The selected mode. Several mode flags may be given; the first in
    /// precedence order wins.
    pub fn mode(&self) -> Mode {
        if self.copy.is_some() {
            Mode::Upload
        } else if self.download.is_some() {
            Mode::Download
        } else if let Some(diagnostic) = self.diagnostic_before_local_command() {
            Mode::Diagnostic(diagnostic)
        } else if self.local_command {
            Mode::LocalCommand
        } else if let Some(diagnostic) = self.diagnostic_after_local_command() {
            Mode::Diagnostic(diagnostic)
        } else if self.script.is_some() {
            Mode::Script
        } else {
            Mode::Exec
        }
    }
}
