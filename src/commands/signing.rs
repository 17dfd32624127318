use crate::*;

pub fn handle_signing_commands(cli: &Cli) -> anyhow::Result<bool> {
    let Commands::Sign {
        path,
        keycode,
        opcode,
        params,
        esrp_tool,
    } = &cli.command
    else {
        return Ok(false);
    };

    // Everything that can fail without touching the filesystem goes first.
    let settings = SigningSettings::from_env(&process_env)?;
    let parameters = parse_params(params)?;

    let files = scan_input_files(path)?;
    if !cli.json {
        println!("Found files:");
        for f in &files {
            println!("  {}", path.join(f).display());
        }
    }

    let source_root = path.to_string_lossy();
    let destination_root = settings.workspace.to_string_lossy();
    let request = SigningRequest::new(
        &settings.credential,
        BatchSpec {
            source_root: &source_root,
            destination_root: &destination_root,
            files: &files,
            key_code: keycode,
            operation_code: opcode,
            parameters,
        },
    );
    request.write_to(&settings.workspace)?;
    tracing::info!(
        files = request.file_count(),
        workspace = %settings.workspace.display(),
        "wrote signing descriptors"
    );

    let tool = resolve_tool(esrp_tool, &settings.workspace);
    let run = run_esrp_client(&tool, &settings.workspace)?;
    relay_tool_log(cli.json, &redact_upload_urls(&run.log));

    if !run.success {
        let code = run
            .code
            .map(|c| c.to_string())
            .unwrap_or_else(|| "none".to_string());
        return Err(ReleaseError::ExternalTool(format!(
            "failed to run {} (exit code {})",
            tool.display(),
            code
        ))
        .into());
    }

    let esrp_output = read_esrp_output(&settings.workspace);
    if let (Some(out), false) = (&esrp_output, cli.json) {
        println!("ESRP output json:");
        println!("{}", pretty_json(out));
    }

    let results = collect_results(&files, &settings.workspace);
    for r in results.iter().filter(|r| !r.signed) {
        tracing::warn!("no signed output for {}", r.file);
    }

    let report = SignReport {
        workspace: destination_root.into_owned(),
        key_code: keycode.clone(),
        operation_code: opcode.clone(),
        files: results,
        esrp_output,
    };
    print_report(cli.json, true, &report, |r| {
        r.files
            .iter()
            .filter(|f| f.signed)
            .flat_map(|f| ["Success!".to_string(), format!("Signed {}", f.file)])
            .collect()
    })?;

    Ok(true)
}
