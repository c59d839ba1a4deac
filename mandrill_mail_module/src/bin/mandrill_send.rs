//! Sends one message through Mandrill from the command line.

use std::env;
use std::fs;
use std::process::exit;

use mandrill_mail_module::{Mailer, RawHeaders, RawMessageRequest};
use tracing::error;

fn print_usage() {
    eprintln!(
        r##"Usage: mandrill-send --to=<addresses> --subject=<text> (--body=<text> | --body-file=<path>) [--header="Name: value"]...

Options:
  --to           Recipient address or comma-separated list
  --subject      Message subject
  --body         Message body
  --body-file    Read the message body from a file
  --header       Extra header line; may be repeated (From, Cc, Bcc, Reply-To,
                 Importance, Content-Type, X-*)

Environment Variables:
  MANDRILL_API_KEY       - Mandrill API key (required)
  MANDRILL_API_BASE_URL  - API base URL (default https://mandrillapp.com/api/1.0)
  MANDRILL_FROM_EMAIL    - Default sender address
  MAIL_SENDER_DOMAIN     - Domain used for the default sender when MANDRILL_FROM_EMAIL is unset
  MANDRILL_FROM_NAME     - Default sender name
  MANDRILL_CONTENT_TYPE  - Default content type (default text/plain)
"##
    );
}

fn flag_values(args: &[String], flag: &str) -> Vec<String> {
    let prefix = format!("{}=", flag);
    let mut values = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if let Some(value) = arg.strip_prefix(&prefix) {
            values.push(value.to_string());
        } else if arg == flag {
            if let Some(value) = iter.next() {
                values.push(value.clone());
            }
        }
    }
    values
}

fn flag_value(args: &[String], flag: &str) -> Option<String> {
    flag_values(args, flag).into_iter().last()
}

fn build_request(args: &[String]) -> Result<RawMessageRequest, String> {
    let to = flag_value(args, "--to").ok_or("missing --to")?;
    let subject = flag_value(args, "--subject").unwrap_or_default();
    let body = match (flag_value(args, "--body"), flag_value(args, "--body-file")) {
        (Some(body), _) => body,
        (None, Some(path)) => {
            fs::read_to_string(&path).map_err(|err| format!("failed to read {}: {}", path, err))?
        }
        (None, None) => return Err("missing --body or --body-file".to_string()),
    };

    let mut request = RawMessageRequest::new(to, subject, body);
    let headers = flag_values(args, "--header");
    if !headers.is_empty() {
        request.headers = Some(RawHeaders::Lines(headers));
    }
    Ok(request)
}

fn main() {
    tracing_subscriber::fmt().with_target(false).init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        print_usage();
        return;
    }

    let request = match build_request(&args) {
        Ok(request) => request,
        Err(err) => {
            error!("{}", err);
            print_usage();
            exit(2);
        }
    };

    if !Mailer::from_env().send(request) {
        exit(1);
    }
}
