use neurotiq_core::{InvitationForm, submit_invitation};

pub fn run(form: InvitationForm, json: bool) {
    let invitation = match submit_invitation(&form) {
        Ok(invitation) => invitation,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    if json {
        match serde_json::to_string_pretty(&invitation) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    println!("Invitation {} recorded", invitation.id);
    println!(
        "  Doctor:         {} <{}>",
        invitation.form.doctor_name.trim(),
        invitation.form.doctor_email.trim()
    );
    if let Some(sp) = invitation.specialization {
        println!("  Specialization: {}", sp.label());
    }
    if !invitation.form.hospital_name.is_empty() {
        println!("  Hospital:       {}", invitation.form.hospital_name);
    }
    if !invitation.form.additional_notes.is_empty() {
        println!("  Notes:          {}", invitation.form.additional_notes);
    }
}
