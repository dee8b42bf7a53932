mod ask_user;
mod click;
mod navigate;
mod page_info;
mod screenshot;
mod scroll;
mod type_text;
mod write_file;
