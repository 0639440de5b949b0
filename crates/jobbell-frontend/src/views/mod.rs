pub mod dropdown;
