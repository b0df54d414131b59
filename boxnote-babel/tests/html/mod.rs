mod end_to_end;
mod text_preservation;
